//! Mapping catalog for localized asset-inventory imports.
//!
//! The catalog holds per-asset-type header tables plus the status, category
//! and manufacturer value tables. It is loaded once and then only read.
//!
//! # Example
//!
//! ```ignore
//! use ais_catalog::{AssetType, MappingCatalog};
//!
//! let catalog = MappingCatalog::embedded_default()?;
//! let header = catalog.resolve_field("设备名称", AssetType::Assets);
//! assert_eq!(header.canonical, "Item Name");
//! assert_eq!(catalog.resolve_value("Status", "在用"), "Deployed");
//! ```

#![deny(unsafe_code)]

mod asset_type;
mod catalog;
pub mod embedded;
mod error;
mod resolve;

// === Error Types ===
pub use error::{CatalogError, Result};

// === Catalog ===
pub use asset_type::AssetType;
pub use catalog::{FieldTable, MappingCatalog};

// === Resolution ===
pub use resolve::{FieldResolution, LookupStrategy, RESOLUTION_ORDER, ValueDomain};
