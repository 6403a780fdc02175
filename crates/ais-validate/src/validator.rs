//! Header checks against import requirements.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ais_ingest::{DetectionProfile, EncodingResolver, ParsedTable, parse_table_with_delimiter};
use serde::Serialize;

use crate::error::Result;
use crate::issue::Issue;

/// Fields every import file must carry, whatever the asset type.
pub const DEFAULT_REQUIRED_FIELDS: [&str; 1] = ["Category"];

/// Outcome of checking one header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Header cells as read.
    pub header: Vec<String>,
    /// Every issue found, missing required fields first.
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// True when no issue was found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn field_count(&self) -> usize {
        self.header.len()
    }

    /// Required fields that were not found.
    pub fn missing_required(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|issue| match issue {
            Issue::MissingRequiredField { field } => Some(field.as_str()),
            _ => None,
        })
    }

    /// Issues other than missing required fields.
    pub fn structural_issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| !matches!(issue, Issue::MissingRequiredField { .. }))
    }
}

/// Outcome of checking one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileValidation {
    pub path: PathBuf,
    /// Encoding the file was read with.
    pub encoding: String,
    pub report: ValidationReport,
}

/// Checks header rows for required fields, empty cells and duplicates.
#[derive(Debug, Clone)]
pub struct StructuralValidator {
    required_fields: Vec<String>,
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralValidator {
    /// Validator requiring [`DEFAULT_REQUIRED_FIELDS`].
    pub fn new() -> Self {
        Self::with_required_fields(DEFAULT_REQUIRED_FIELDS.map(String::from))
    }

    pub fn with_required_fields(fields: impl IntoIterator<Item = String>) -> Self {
        Self {
            required_fields: fields.into_iter().collect(),
        }
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    /// Checks the header row of a parsed table.
    pub fn validate(&self, table: &ParsedTable) -> ValidationReport {
        self.validate_header(table.header())
    }

    /// Checks a header row.
    ///
    /// Required fields must match exactly. Empty cells are reported by
    /// 1-indexed position. Each repeat of a header is reported once, so a
    /// name seen three times yields two issues.
    pub fn validate_header(&self, header: &[String]) -> ValidationReport {
        let mut issues: Vec<Issue> = self
            .required_fields
            .iter()
            .filter(|required| !header.contains(required))
            .map(|field| Issue::MissingRequiredField {
                field: field.clone(),
            })
            .collect();

        issues.extend(
            header
                .iter()
                .enumerate()
                .filter(|(_, field)| field.trim().is_empty())
                .map(|(index, _)| Issue::EmptyHeader { column: index + 1 }),
        );

        let mut seen = HashSet::new();
        for field in header {
            if !seen.insert(field.as_str()) {
                issues.push(Issue::DuplicateHeader {
                    field: field.clone(),
                });
            }
        }

        ValidationReport {
            header: header.to_vec(),
            issues,
        }
    }

    /// Reads `path` and checks its header.
    ///
    /// The file is expected to be comma-separated, as written by conversion.
    pub fn validate_file(&self, path: &Path) -> Result<FileValidation> {
        let decoded = EncodingResolver::new(DetectionProfile::Tabular).decode_file(path)?;
        let table = parse_table_with_delimiter(&decoded.text, b',')?;
        let report = self.validate(&table);

        tracing::info!(
            path = %path.display(),
            valid = report.is_valid(),
            issues = report.issues.len(),
            "validated file"
        );
        for issue in &report.issues {
            tracing::debug!(path = %path.display(), code = issue.code(), "{issue}");
        }

        Ok(FileValidation {
            path: path.to_path_buf(),
            encoding: decoded.guess.name.to_string(),
            report,
        })
    }
}

/// Checks `path` with the default required fields.
pub fn validate_file(path: &Path) -> Result<FileValidation> {
    StructuralValidator::new().validate_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_valid_header() {
        let report = StructuralValidator::new().validate_header(&header(&["Item Name", "Category"]));
        assert!(report.is_valid());
        assert_eq!(report.field_count(), 2);
    }

    #[test]
    fn test_required_field_must_match_exactly() {
        let report = StructuralValidator::new().validate_header(&header(&["category", " Category"]));
        assert_eq!(report.missing_required().collect::<Vec<_>>(), vec!["Category"]);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_empty_headers_use_one_indexed_columns() {
        let report =
            StructuralValidator::new().validate_header(&header(&["Category", "", "Status", "  "]));
        assert_eq!(
            report.issues,
            vec![
                Issue::EmptyHeader { column: 2 },
                Issue::EmptyHeader { column: 4 },
            ]
        );
    }

    #[test]
    fn test_each_repeat_is_flagged() {
        let report = StructuralValidator::new()
            .validate_header(&header(&["Category", "Status", "Status", "Status"]));
        assert_eq!(
            report.issues,
            vec![
                Issue::DuplicateHeader {
                    field: "Status".to_string()
                };
                2
            ]
        );
    }

    #[test]
    fn test_repeated_empty_headers_are_both_empty_and_duplicate() {
        let report = StructuralValidator::new().validate_header(&header(&["", "Category", ""]));
        assert_eq!(
            report.issues,
            vec![
                Issue::EmptyHeader { column: 1 },
                Issue::EmptyHeader { column: 3 },
                Issue::DuplicateHeader {
                    field: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_custom_required_fields() {
        let validator =
            StructuralValidator::with_required_fields(["Category".to_string(), "Item Name".to_string()]);
        let report = validator.validate_header(&header(&["Category"]));
        assert_eq!(report.missing_required().collect::<Vec<_>>(), vec!["Item Name"]);
    }
}
