//! Catalog loading.
//!
//! The catalog is read once from a JSON document with four top-level tables:
//! `field_mappings` (keyed by asset type), `status_mappings`,
//! `category_mappings` and `manufacturer_mappings`. Missing tables default to
//! empty; anything else that does not fit the shape is rejected.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::asset_type::AssetType;
use crate::embedded;
use crate::error::{CatalogError, Result};

/// Header mappings for one asset type, in the order the catalog lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: Vec<(String, String)>,
    index: BTreeMap<String, usize>,
}

impl FieldTable {
    /// Builds a table from `(source, canonical)` pairs.
    ///
    /// A repeated source header keeps its first position and takes the last value.
    pub fn from_pairs<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::default();
        for (source, canonical) in pairs {
            table.insert(source.into(), canonical.into());
        }
        table
    }

    fn insert(&mut self, source: String, canonical: String) {
        match self.index.get(&source) {
            Some(&position) => self.entries[position].1 = canonical,
            None => {
                self.index.insert(source.clone(), self.entries.len());
                self.entries.push((source, canonical));
            }
        }
    }

    /// Canonical header for a source header.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.index
            .get(source)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// `(source, canonical)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(source, canonical)| (source.as_str(), canonical.as_str()))
    }

    /// Source-language headers in catalog order.
    pub fn source_headers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(source, _)| source.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable field and value translation tables.
///
/// Load it once, then share it by reference with every pipeline component.
#[derive(Debug, Clone, Default)]
pub struct MappingCatalog {
    pub(crate) field_mappings: BTreeMap<AssetType, FieldTable>,
    pub(crate) status_mappings: BTreeMap<String, String>,
    pub(crate) category_mappings: BTreeMap<String, String>,
    pub(crate) manufacturer_mappings: BTreeMap<String, String>,
    pub(crate) canonical_fields: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    field_mappings: Map<String, Value>,
    #[serde(default)]
    status_mappings: BTreeMap<String, String>,
    #[serde(default)]
    category_mappings: BTreeMap<String, String>,
    #[serde(default)]
    manufacturer_mappings: BTreeMap<String, String>,
}

impl MappingCatalog {
    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CatalogError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let catalog = Self::from_json_str(&contents, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            asset_types = catalog.field_mappings.len(),
            canonical_fields = catalog.canonical_fields.len(),
            "mapping catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog compiled into this crate.
    pub fn embedded_default() -> Result<Self> {
        Self::from_json_str(embedded::DEFAULT_MAPPING, embedded::DEFAULT_MAPPING_NAME)
    }

    /// Parses a catalog from JSON text. `source_name` is only used in errors.
    pub fn from_json_str(json: &str, source_name: &str) -> Result<Self> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|source| CatalogError::Malformed {
                source_name: source_name.to_string(),
                source,
            })?;

        let mut field_mappings = BTreeMap::new();
        for (tag, table) in raw.field_mappings {
            let asset_type: AssetType =
                tag.parse().map_err(|_| CatalogError::UnknownAssetType {
                    tag: tag.clone(),
                    source_name: source_name.to_string(),
                })?;
            let Value::Object(entries) = table else {
                return Err(CatalogError::InvalidEntry {
                    table: "field_mappings".to_string(),
                    key: tag,
                    reason: "expected an object of header mappings".to_string(),
                    source_name: source_name.to_string(),
                });
            };
            let mut field_table = FieldTable::default();
            for (source, canonical) in entries {
                let Value::String(canonical) = canonical else {
                    return Err(CatalogError::InvalidEntry {
                        table: format!("field_mappings.{tag}"),
                        key: source,
                        reason: "canonical header must be a string".to_string(),
                        source_name: source_name.to_string(),
                    });
                };
                field_table.insert(source, canonical);
            }
            field_mappings.insert(asset_type, field_table);
        }

        let canonical_fields = field_mappings
            .values()
            .flat_map(|table| table.iter().map(|(_, canonical)| canonical.to_string()))
            .collect();

        Ok(Self {
            field_mappings,
            status_mappings: raw.status_mappings,
            category_mappings: raw.category_mappings,
            manufacturer_mappings: raw.manufacturer_mappings,
            canonical_fields,
        })
    }

    /// Header table for an asset type, if the catalog defines one.
    pub fn field_table(&self, asset_type: AssetType) -> Option<&FieldTable> {
        self.field_mappings.get(&asset_type)
    }

    /// Asset types that have a header table.
    pub fn asset_types(&self) -> impl Iterator<Item = AssetType> + '_ {
        self.field_mappings.keys().copied()
    }

    /// Every canonical header known to the catalog, across all asset types.
    pub fn canonical_fields(&self) -> &BTreeSet<String> {
        &self.canonical_fields
    }

    /// Returns true if `name` is already a canonical header.
    pub fn is_canonical_field(&self, name: &str) -> bool {
        self.canonical_fields.contains(name)
    }

    pub fn status_mappings(&self) -> &BTreeMap<String, String> {
        &self.status_mappings
    }

    pub fn category_mappings(&self) -> &BTreeMap<String, String> {
        &self.category_mappings
    }

    pub fn manufacturer_mappings(&self) -> &BTreeMap<String, String> {
        &self.manufacturer_mappings
    }
}
