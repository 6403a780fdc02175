//! Whole-file UTF-8 normalization.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::detect::{DetectionMethod, EncodingGuess, StatisticalDetector, count_cjk};
use super::resolver::{EncodingResolver, decode_with_label};
use crate::csv::parse_table_with_delimiter;
use crate::error::{IngestError, Result, read_bytes};

/// Number of header fields echoed back by the parse check.
pub const HEADER_PREVIEW_FIELDS: usize = 5;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of rewriting one file as UTF-8.
#[derive(Debug, Clone, Serialize)]
pub struct Utf8Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Encoding the input was decoded with.
    pub source_encoding: String,
    pub confidence: f32,
    pub method: DetectionMethod,
    /// The input started with a byte-order mark (not written to the output).
    pub had_bom: bool,
}

/// Character statistics of a UTF-8 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Utf8Report {
    pub has_bom: bool,
    pub total_chars: usize,
    pub cjk_chars: usize,
}

/// Everything [`fix_encoding`] checked.
#[derive(Debug, Clone, Serialize)]
pub struct EncodingFixReport {
    pub conversion: Utf8Conversion,
    pub utf8: Utf8Report,
    /// Number of header fields in the rewritten file.
    pub header_fields: usize,
    /// Number of rows after the header.
    pub data_rows: usize,
    /// First few header fields.
    pub header_preview: Vec<String>,
}

/// Detects the encoding of `input` and writes its text to `output` as UTF-8
/// without a byte-order mark.
///
/// With `label` set, detection is skipped and that encoding is used.
pub fn convert_to_utf8<D: StatisticalDetector>(
    resolver: &EncodingResolver<D>,
    input: &Path,
    output: &Path,
    label: Option<&str>,
) -> Result<Utf8Conversion> {
    let bytes = read_bytes(input)?;
    let decoded = match label {
        Some(label) => decode_with_label(&bytes, label)?,
        None => resolver.decode(&bytes)?,
    };
    std::fs::write(output, decoded.text.as_bytes()).map_err(|e| IngestError::write(output, e))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        encoding = decoded.guess.name,
        confidence = decoded.guess.confidence,
        "converted to UTF-8"
    );
    Ok(conversion_record(input, output, decoded.guess, decoded.had_bom))
}

fn conversion_record(input: &Path, output: &Path, guess: EncodingGuess, had_bom: bool) -> Utf8Conversion {
    Utf8Conversion {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        source_encoding: guess.name.to_string(),
        confidence: guess.confidence,
        method: guess.method,
        had_bom,
    }
}

/// Converts `input` to UTF-8 at `output`, then checks the result decodes as
/// UTF-8 and parses as comma-separated text with at least one row.
pub fn fix_encoding<D: StatisticalDetector>(
    resolver: &EncodingResolver<D>,
    input: &Path,
    output: &Path,
) -> Result<EncodingFixReport> {
    let conversion = convert_to_utf8(resolver, input, output, None)?;

    let bytes = read_bytes(output)?;
    let utf8 = inspect_utf8(&bytes)?;
    let text = std::str::from_utf8(&bytes).map_err(|e| IngestError::NotUtf8 {
        message: e.to_string(),
    })?;
    let table = parse_table_with_delimiter(text, b',')?;

    let header = table.header();
    let report = EncodingFixReport {
        conversion,
        utf8,
        header_fields: header.len(),
        data_rows: table.data_rows().len(),
        header_preview: header.iter().take(HEADER_PREVIEW_FIELDS).cloned().collect(),
    };
    tracing::debug!(
        output = %output.display(),
        header_fields = report.header_fields,
        data_rows = report.data_rows,
        "UTF-8 output parses"
    );
    Ok(report)
}

/// Checks that `bytes` are UTF-8 and counts characters.
pub fn inspect_utf8(bytes: &[u8]) -> Result<Utf8Report> {
    let has_bom = bytes.starts_with(UTF8_BOM);
    let text = std::str::from_utf8(bytes).map_err(|e| IngestError::NotUtf8 {
        message: e.to_string(),
    })?;
    Ok(Utf8Report {
        has_bom,
        total_chars: text.chars().count(),
        cjk_chars: count_cjk(text),
    })
}

pub fn inspect_utf8_file(path: &Path) -> Result<Utf8Report> {
    inspect_utf8(&read_bytes(path)?)
}

/// Removes a leading UTF-8 byte-order mark in place. Returns whether one was
/// removed.
pub fn strip_bom_file(path: &Path) -> Result<bool> {
    let bytes = read_bytes(path)?;
    let Some(rest) = bytes.strip_prefix(UTF8_BOM) else {
        return Ok(false);
    };
    std::fs::write(path, rest).map_err(|e| IngestError::write(path, e))?;
    tracing::info!(path = %path.display(), "removed UTF-8 byte-order mark");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::DetectionProfile;
    use encoding_rs::GBK;
    use tempfile::TempDir;

    fn resolver() -> EncodingResolver {
        EncodingResolver::new(DetectionProfile::General)
    }

    #[test]
    fn test_fix_encoding_rewrites_gbk_as_utf8() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("assets.csv");
        let output = dir.path().join("assets_temp.csv");
        let text = "设备名称,类别,状态\n笔记本,笔记本电脑,在用\n";
        std::fs::write(&input, GBK.encode(text).0).unwrap();

        let report = fix_encoding(&resolver(), &input, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
        assert_eq!(report.header_fields, 3);
        assert_eq!(report.data_rows, 1);
        assert_eq!(report.header_preview, vec!["设备名称", "类别", "状态"]);
        assert!(!report.utf8.has_bom);
        assert_eq!(report.utf8.cjk_chars, 18);
    }

    #[test]
    fn test_fix_encoding_drops_bom() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bom.csv");
        let output = dir.path().join("bom_temp.csv");
        std::fs::write(&input, "\u{feff}类别\n笔记本电脑\n").unwrap();

        let report = fix_encoding(&resolver(), &input, &output).unwrap();

        assert!(report.conversion.had_bom);
        assert!(!std::fs::read(&output).unwrap().starts_with(UTF8_BOM));
    }

    #[test]
    fn test_fix_encoding_rejects_empty_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty.csv");
        let output = dir.path().join("empty_temp.csv");
        std::fs::write(&input, b"").unwrap();

        let result = fix_encoding(&resolver(), &input, &output);
        assert!(matches!(result, Err(IngestError::EmptyInput)));
    }

    #[test]
    fn test_convert_with_explicit_label() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, GBK.encode("状态\n在用\n").0).unwrap();

        let conversion = convert_to_utf8(&resolver(), &input, &output, Some("gb2312")).unwrap();

        assert_eq!(conversion.source_encoding, "gb2312");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "状态\n在用\n");
    }

    #[test]
    fn test_inspect_utf8() {
        let report = inspect_utf8("\u{feff}类别a".as_bytes()).unwrap();
        assert!(report.has_bom);
        assert_eq!(report.total_chars, 4);
        assert_eq!(report.cjk_chars, 2);

        assert!(matches!(
            inspect_utf8(b"\xFF\xFE"),
            Err(IngestError::NotUtf8 { .. })
        ));
    }

    #[test]
    fn test_strip_bom_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}a,b\n").unwrap();

        assert!(strip_bom_file(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
        assert!(!strip_bom_file(&path).unwrap());
    }
}
