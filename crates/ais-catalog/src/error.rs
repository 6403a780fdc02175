//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a mapping catalog.
///
/// Every variant is fatal: a run must not start without a usable catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Mapping file does not exist.
    #[error("mapping file not found: {path}")]
    NotFound { path: PathBuf },

    /// Mapping file exists but could not be read.
    #[error("failed to read mapping file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping source is not well-formed JSON of the expected shape.
    #[error("invalid JSON in mapping source {source_name}: {source}")]
    Malformed {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// `field_mappings` names an asset type outside the fixed set.
    #[error("unknown asset type '{tag}' in {source_name}")]
    UnknownAssetType { tag: String, source_name: String },

    /// A mapping entry has the wrong shape.
    #[error("invalid entry '{key}' in {table} of {source_name}: {reason}")]
    InvalidEntry {
        table: String,
        key: String,
        reason: String,
        source_name: String,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::NotFound {
            path: PathBuf::from("chinese-field-mapping.json"),
        };
        assert_eq!(
            err.to_string(),
            "mapping file not found: chinese-field-mapping.json"
        );
    }

    #[test]
    fn test_unknown_asset_type_display() {
        let err = CatalogError::UnknownAssetType {
            tag: "vehicles".to_string(),
            source_name: "custom.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown asset type 'vehicles' in custom.json"
        );
    }
}
