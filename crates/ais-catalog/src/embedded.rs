//! Catalog data compiled into the crate.
//!
//! The default catalog is embedded with `include_str!()` so the tools work
//! without a mapping file next to the binary. A `--mapping` file replaces it
//! entirely; the two are never merged.

/// Display name used for the embedded catalog in errors and logs.
pub const DEFAULT_MAPPING_NAME: &str = "embedded chinese-field-mapping.json";

/// Simplified Chinese to Snipe-IT importer field and value mappings.
pub const DEFAULT_MAPPING: &str = include_str!("../data/chinese-field-mapping.json");
