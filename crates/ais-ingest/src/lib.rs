//! Input handling for asset inventory files.
//!
//! This crate turns raw spreadsheet exports into decoded text tables:
//!
//! - **Encoding**: statistical detection with a candidate cascade, UTF-8
//!   normalization, byte-order mark handling
//! - **CSV**: delimiter sniffing, ragged-row parsing, comma-separated output
//! - **Discovery**: glob-filtered directory listing
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ais_ingest::{DetectionProfile, EncodingResolver, fix_encoding, list_csv_files};
//!
//! let resolver = EncodingResolver::new(DetectionProfile::General);
//! for file in list_csv_files(Path::new("exports"))? {
//!     let report = fix_encoding(&resolver, &file, Path::new("out/assets_temp.csv"))?;
//!     println!("{} columns", report.header_fields);
//! }
//! ```

#![deny(unsafe_code)]

pub mod csv;
mod discovery;
pub mod encoding;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encoding ===
pub use encoding::{
    Candidate, ChardetDetector, DecodedText, DetectionMethod, DetectionProfile,
    EncodingFixReport, EncodingGuess, EncodingResolver, StatisticalDetector, Utf8Conversion,
    Utf8Report, convert_to_utf8, decode_with_label, fix_encoding, inspect_utf8,
    inspect_utf8_file, strip_bom_file,
};

// === CSV ===
pub use crate::csv::{ParsedTable, parse_table, parse_table_with_delimiter, write_table};

// === File Discovery ===
pub use discovery::{DEFAULT_PATTERN, discover_files, list_csv_files};
