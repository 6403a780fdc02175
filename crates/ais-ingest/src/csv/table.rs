//! In-memory tables of decoded CSV text.

use csv::ReaderBuilder;

use super::sniff::sniff_delimiter;
use crate::error::{IngestError, Result};

/// Rows of text cells; the first row is the header.
///
/// Rows may differ in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    rows: Vec<Vec<String>>,
    delimiter: u8,
}

impl ParsedTable {
    /// Builds a table from rows. Fails if there are none.
    pub fn from_rows(rows: Vec<Vec<String>>, delimiter: u8) -> Result<Self> {
        if rows.is_empty() {
            return Err(IngestError::EmptyInput);
        }
        Ok(Self { rows, delimiter })
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Delimiter the text was split on.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

/// Parses CSV text, sniffing the delimiter.
pub fn parse_table(text: &str) -> Result<ParsedTable> {
    parse_table_with_delimiter(text, sniff_delimiter(text))
}

/// Parses CSV text with a known delimiter.
pub fn parse_table_with_delimiter(text: &str, delimiter: u8) -> Result<ParsedTable> {
    if text.contains('\0') {
        return Err(IngestError::CsvParse {
            message: "input contains NUL characters (binary content?)".to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::trace!(
        rows = rows.len(),
        delimiter = %char::from(delimiter).escape_default(),
        "parsed table"
    );
    ParsedTable::from_rows(rows, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let table = parse_table("设备名称,类别\n笔记本,笔记本电脑\n").unwrap();
        assert_eq!(table.header(), ["设备名称", "类别"]);
        assert_eq!(table.data_rows(), [vec!["笔记本", "笔记本电脑"]]);
        assert_eq!(table.delimiter(), b',');
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let table = parse_table("a,b\n1,2,3\n4\n").unwrap();
        assert_eq!(table.rows()[1].len(), 3);
        assert_eq!(table.rows()[2].len(), 1);
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse_table("name,note\n\"Dell, Inc.\",\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.data_rows()[0], vec!["Dell, Inc.", "say \"hi\""]);
    }

    #[test]
    fn test_sniffed_semicolon() {
        let table = parse_table("a;b\n1;2\n").unwrap();
        assert_eq!(table.delimiter(), b';');
        assert_eq!(table.header(), ["a", "b"]);
    }

    #[test]
    fn test_explicit_delimiter() {
        let table = parse_table_with_delimiter("a;b\n1;2\n", b',').unwrap();
        assert_eq!(table.header(), ["a;b"]);
    }

    #[test]
    fn test_header_only() {
        let table = parse_table("类别\n").unwrap();
        assert_eq!(table.header(), ["类别"]);
        assert!(table.data_rows().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_table(""), Err(IngestError::EmptyInput)));
    }

    #[test]
    fn test_nul_is_rejected() {
        assert!(matches!(
            parse_table("a,b\n\0\0\n"),
            Err(IngestError::CsvParse { .. })
        ));
    }
}
