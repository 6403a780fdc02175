//! Error types for field conversion.

use ais_catalog::AssetType;
use ais_ingest::IngestError;
use thiserror::Error;

/// Errors from converting or templating a file.
#[derive(Debug, Error)]
pub enum MapError {
    /// Reading, decoding, parsing or writing failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The catalog has no header table for the requested asset type.
    #[error("no field mappings defined for asset type '{asset_type}'")]
    NoMappings { asset_type: AssetType },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;
