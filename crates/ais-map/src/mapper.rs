//! Header and cell translation of parsed tables.

use ais_catalog::{AssetType, LookupStrategy, MappingCatalog};
use ais_ingest::ParsedTable;
use serde::Serialize;

/// A header cell that changed during mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMapping {
    /// 1-indexed column position.
    pub column: usize,
    pub original: String,
    pub canonical: String,
    pub strategy: LookupStrategy,
}

/// What happened to the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingLog {
    /// Header cells whose canonical form differs from the input.
    pub entries: Vec<HeaderMapping>,
    /// Non-empty headers no table knew, trimmed.
    pub unmatched: Vec<String>,
}

impl MappingLog {
    pub fn converted_count(&self) -> usize {
        self.entries.len()
    }
}

/// Rows after mapping. The first row is the canonical header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedTable {
    pub rows: Vec<Vec<String>>,
    pub log: MappingLog,
}

impl MappedTable {
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// Translates source-language tables into canonical ones.
#[derive(Debug, Clone, Copy)]
pub struct FieldValueMapper<'a> {
    catalog: &'a MappingCatalog,
}

impl<'a> FieldValueMapper<'a> {
    pub fn new(catalog: &'a MappingCatalog) -> Self {
        Self { catalog }
    }

    /// Resolves every header cell for `asset_type`.
    pub fn map_header(&self, header: &[String], asset_type: AssetType) -> (Vec<String>, MappingLog) {
        let mut log = MappingLog::default();
        let mut canonical_header = Vec::with_capacity(header.len());

        for (index, original) in header.iter().enumerate() {
            let resolution = self.catalog.resolve_field(original, asset_type);
            if !resolution.matched() && !resolution.canonical.is_empty() {
                tracing::warn!(field = %resolution.canonical, %asset_type, "no mapping for header");
                log.unmatched.push(resolution.canonical.clone());
            }
            if resolution.canonical != *original {
                tracing::debug!(
                    column = index + 1,
                    original = %original,
                    canonical = %resolution.canonical,
                    strategy = %resolution.strategy,
                    "header mapped"
                );
                log.entries.push(HeaderMapping {
                    column: index + 1,
                    original: original.clone(),
                    canonical: resolution.canonical.clone(),
                    strategy: resolution.strategy,
                });
            }
            canonical_header.push(resolution.canonical);
        }

        (canonical_header, log)
    }

    /// Translates one data row against an already mapped header.
    ///
    /// Cells past the end of the header are copied unchanged.
    pub fn map_row(&self, canonical_header: &[String], row: &[String]) -> Vec<String> {
        row.iter()
            .enumerate()
            .map(|(index, cell)| match canonical_header.get(index) {
                Some(field) => self.catalog.resolve_value(field, cell),
                None => cell.clone(),
            })
            .collect()
    }

    /// Maps the header row and every data row of `table`.
    pub fn map(&self, table: &ParsedTable, asset_type: AssetType) -> MappedTable {
        let (header, log) = self.map_header(table.header(), asset_type);
        let mut rows = Vec::with_capacity(table.rows().len());
        for row in table.data_rows() {
            rows.push(self.map_row(&header, row));
        }
        rows.insert(0, header);
        MappedTable { rows, log }
    }
}
