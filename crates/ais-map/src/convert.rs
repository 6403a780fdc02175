//! Single-file field conversion.

use std::path::{Path, PathBuf};

use ais_catalog::{AssetType, MappingCatalog};
use ais_ingest::{DetectionProfile, EncodingResolver, parse_table, write_table};
use serde::Serialize;

use crate::error::Result;
use crate::mapper::{FieldValueMapper, MappingLog};

/// Summary of one converted file.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub asset_type: AssetType,
    /// Encoding the input was read with.
    pub encoding: String,
    pub confidence: f32,
    /// Delimiter sniffed from the input.
    pub delimiter: char,
    /// Header width after mapping.
    pub columns: usize,
    /// Rows written after the header.
    pub data_rows: usize,
    pub log: MappingLog,
}

/// Reads `input`, translates headers and values for `asset_type`, and writes
/// comma-separated UTF-8 to `output`.
pub fn convert_file(
    catalog: &MappingCatalog,
    input: &Path,
    output: &Path,
    asset_type: AssetType,
) -> Result<ConversionReport> {
    let decoded = EncodingResolver::new(DetectionProfile::Tabular).decode_file(input)?;
    let table = parse_table(&decoded.text)?;
    let mapped = FieldValueMapper::new(catalog).map(&table, asset_type);
    write_table(output, &mapped.rows)?;

    let report = ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        asset_type,
        encoding: decoded.guess.name.to_string(),
        confidence: decoded.guess.confidence,
        delimiter: char::from(table.delimiter()),
        columns: mapped.header().len(),
        data_rows: mapped.data_rows().len(),
        log: mapped.log,
    };
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        %asset_type,
        converted_headers = report.log.converted_count(),
        unmatched_headers = report.log.unmatched.len(),
        rows = report.data_rows,
        "converted fields"
    );
    Ok(report)
}
