//! CSV output.

use std::path::Path;

use csv::WriterBuilder;

use crate::error::{IngestError, Result};

/// Writes rows as comma-separated UTF-8 without a byte-order mark.
///
/// Rows may differ in length; fields are quoted only when needed.
pub fn write_table(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let csv_error = |message: String| IngestError::CsvWrite {
        path: path.to_path_buf(),
        message,
    };

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(e.to_string()))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| csv_error(e.to_string()))?;
    }
    writer.flush().map_err(|e| IngestError::write(path, e))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote CSV");
    Ok(())
}
