//! Outcome records produced by the batch pipeline.

use std::path::{Path, PathBuf};

use ais_catalog::AssetType;
use ais_validate::ValidationReport;

/// Result of one pipeline stage for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Succeeded,
    Failed,
    /// Not attempted because an earlier stage failed.
    Skipped,
}

impl StageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "ok",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub status: StageStatus,
    pub message: String,
}

impl StageOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Succeeded,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Failed,
            message: message.into(),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Skipped,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == StageStatus::Succeeded
    }
}

/// Disposition of one input file.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    /// UTF-8 copy written by the encoding stage.
    pub intermediate: PathBuf,
    /// Converted file written by the mapping stage.
    pub output: PathBuf,
    pub asset_type: AssetType,
    pub encoding: StageOutcome,
    pub mapping: StageOutcome,
    /// Encoding the input was read with, when the encoding stage succeeded.
    pub source_encoding: Option<String>,
    /// Headers that no catalog table knew.
    pub unmatched_headers: Vec<String>,
}

impl ConversionOutcome {
    /// True only when both stages succeeded.
    pub fn overall_success(&self) -> bool {
        self.encoding.is_success() && self.mapping.is_success()
    }

    pub fn input_name(&self) -> String {
        file_name(&self.input)
    }

    pub fn output_name(&self) -> String {
        file_name(&self.output)
    }
}

/// Outcomes of one batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub asset_type: AssetType,
    pub output_dir: PathBuf,
    /// One entry per discovered file, in processing order.
    pub outcomes: Vec<ConversionOutcome>,
    /// Checks of the successful outputs. Never affects success counts.
    pub validation: ValidationSummary,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn successful(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.overall_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Percentage of successful files; 0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.successful() as f64 / self.total() as f64 * 100.0
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Valid,
    Invalid,
    /// The file could not be read or parsed.
    Error,
}

impl ValidationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
            Self::Error => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationDetail {
    pub file: PathBuf,
    pub status: ValidationStatus,
    /// Structural report, absent when the file could not be checked.
    pub report: Option<ValidationReport>,
    /// Read or parse failure.
    pub error: Option<String>,
}

impl ValidationDetail {
    pub fn file_name(&self) -> String {
        file_name(&self.file)
    }
}

/// Validation results over a set of files.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    pub details: Vec<ValidationDetail>,
}

impl ValidationSummary {
    pub fn total(&self) -> usize {
        self.details.len()
    }

    pub fn valid(&self) -> usize {
        self.details
            .iter()
            .filter(|detail| detail.status == ValidationStatus::Valid)
            .count()
    }

    /// Files that are invalid or could not be checked.
    pub fn invalid(&self) -> usize {
        self.total() - self.valid()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(encoding: StageOutcome, mapping: StageOutcome) -> ConversionOutcome {
        ConversionOutcome {
            input: PathBuf::from("in/a.csv"),
            intermediate: PathBuf::from("out/a_temp.csv"),
            output: PathBuf::from("out/a_converted.csv"),
            asset_type: AssetType::Assets,
            encoding,
            mapping,
            source_encoding: None,
            unmatched_headers: Vec::new(),
        }
    }

    #[test]
    fn test_overall_success_needs_both_stages() {
        assert!(
            outcome(StageOutcome::succeeded("ok"), StageOutcome::succeeded("ok"))
                .overall_success()
        );
        assert!(
            !outcome(StageOutcome::succeeded("ok"), StageOutcome::failed("bad"))
                .overall_success()
        );
        assert!(
            !outcome(StageOutcome::failed("bad"), StageOutcome::skipped("skipped"))
                .overall_success()
        );
    }

    #[test]
    fn test_counts_and_rate() {
        let report = BatchReport {
            asset_type: AssetType::Assets,
            output_dir: PathBuf::from("out"),
            outcomes: vec![
                outcome(StageOutcome::succeeded("ok"), StageOutcome::succeeded("ok")),
                outcome(StageOutcome::failed("bad"), StageOutcome::skipped("skipped")),
                outcome(StageOutcome::succeeded("ok"), StageOutcome::succeeded("ok")),
            ],
            validation: ValidationSummary::default(),
        };
        assert_eq!(report.total(), 3);
        assert_eq!(report.successful(), 2);
        assert_eq!(report.failed(), 1);
        assert!((report.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_batch_rate_is_zero() {
        let report = BatchReport {
            asset_type: AssetType::Users,
            output_dir: PathBuf::from("out"),
            outcomes: Vec::new(),
            validation: ValidationSummary::default(),
        };
        assert_eq!(report.success_rate(), 0.0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_file_names() {
        let outcome = outcome(StageOutcome::succeeded("ok"), StageOutcome::succeeded("ok"));
        assert_eq!(outcome.input_name(), "a.csv");
        assert_eq!(outcome.output_name(), "a_converted.csv");
    }
}
