//! CSV parsing and writing.

mod sniff;
mod table;
mod writer;

pub use sniff::{CANDIDATE_DELIMITERS, SNIFF_SAMPLE_CHARS, sniff_delimiter};
pub use table::{ParsedTable, parse_table, parse_table_with_delimiter};
pub use writer::write_table;
