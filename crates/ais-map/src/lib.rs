//! Translation of localized asset inventory tables into canonical form.
//!
//! Header cells are resolved through the [`MappingCatalog`] lookup cascade and
//! status, category and manufacturer cells through its value tables.
//!
//! [`MappingCatalog`]: ais_catalog::MappingCatalog

#![deny(unsafe_code)]

mod convert;
mod error;
mod mapper;
mod template;

// === Error Types ===
pub use error::{MapError, Result};

// === Mapping ===
pub use mapper::{FieldValueMapper, HeaderMapping, MappedTable, MappingLog};

// === File Operations ===
pub use convert::{ConversionReport, convert_file};
pub use template::{TemplateReport, generate_template, sample_value};
