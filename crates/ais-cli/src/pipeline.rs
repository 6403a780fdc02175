//! Batch conversion pipeline with explicit stages.
//!
//! Each input file goes through two stages:
//! 1. **Encoding**: rewrite the file as UTF-8 at `<stem>_temp.csv`
//! 2. **Mapping**: translate headers and values into `<stem>_converted.csv`
//!
//! A failing stage marks the file as failed and the batch moves on. Every
//! successful output is then validated; validation never changes the
//! conversion counts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use ais_catalog::{AssetType, MappingCatalog};
use ais_ingest::{
    ChardetDetector, DetectionProfile, EncodingResolver, StatisticalDetector, discover_files,
    fix_encoding,
};
use ais_map::convert_file;
use ais_validate::StructuralValidator;

use crate::types::{
    BatchReport, ConversionOutcome, StageOutcome, ValidationDetail, ValidationStatus,
    ValidationSummary,
};

/// Suffix of the UTF-8 intermediate file.
pub const INTERMEDIATE_SUFFIX: &str = "_temp.csv";
/// Suffix of the converted output file.
pub const CONVERTED_SUFFIX: &str = "_converted.csv";
/// Glob matching converted outputs in a directory.
pub const CONVERTED_PATTERN: &str = "*_converted.csv";

/// `<output_dir>/<stem>_temp.csv`
pub fn intermediate_path(output_dir: &Path, input: &Path) -> PathBuf {
    output_dir.join(format!("{}{INTERMEDIATE_SUFFIX}", file_stem(input)))
}

/// `<output_dir>/<stem>_converted.csv`
pub fn converted_path(output_dir: &Path, input: &Path) -> PathBuf {
    output_dir.join(format!("{}{CONVERTED_SUFFIX}", file_stem(input)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Runs the two-stage conversion over a set of files.
pub struct BatchOrchestrator<'a, D = ChardetDetector> {
    catalog: &'a MappingCatalog,
    resolver: EncodingResolver<D>,
    validator: StructuralValidator,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(catalog: &'a MappingCatalog) -> Self {
        Self {
            catalog,
            resolver: EncodingResolver::new(DetectionProfile::General),
            validator: StructuralValidator::new(),
        }
    }
}

impl<'a, D: StatisticalDetector> BatchOrchestrator<'a, D> {
    /// Replaces the resolver used by the encoding stage.
    pub fn with_encoding_resolver<E: StatisticalDetector>(
        self,
        resolver: EncodingResolver<E>,
    ) -> BatchOrchestrator<'a, E> {
        BatchOrchestrator {
            catalog: self.catalog,
            resolver,
            validator: self.validator,
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: StructuralValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Processes `files` in file-name order and validates the outputs.
    pub fn run(&self, files: &[PathBuf], output_dir: &Path, asset_type: AssetType) -> BatchReport {
        let mut ordered: Vec<&PathBuf> = files.iter().collect();
        ordered.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let outcomes: Vec<ConversionOutcome> = ordered
            .into_iter()
            .map(|input| self.process_file(input, output_dir, asset_type))
            .collect();

        let converted: Vec<PathBuf> = outcomes
            .iter()
            .filter(|outcome| outcome.overall_success() && outcome.output.is_file())
            .map(|outcome| outcome.output.clone())
            .collect();
        let validation = self.validate_files(&converted);

        let report = BatchReport {
            asset_type,
            output_dir: output_dir.to_path_buf(),
            outcomes,
            validation,
        };
        info!(
            total = report.total(),
            successful = report.successful(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }

    /// Discovers files matching `pattern` in `input_dir` and runs the batch
    /// into `output_dir`, creating it if needed.
    pub fn run_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        asset_type: AssetType,
        pattern: &str,
    ) -> Result<BatchReport> {
        let files = discover_files(input_dir, pattern)
            .with_context(|| format!("discover files in {}", input_dir.display()))?;
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        if files.is_empty() {
            warn!(
                input_dir = %input_dir.display(),
                pattern,
                "no files match the pattern"
            );
        } else {
            info!(count = files.len(), %asset_type, "processing files");
        }
        Ok(self.run(&files, output_dir, asset_type))
    }

    /// Runs both stages for one file. Never fails; problems are recorded in
    /// the returned outcome.
    pub fn process_file(
        &self,
        input: &Path,
        output_dir: &Path,
        asset_type: AssetType,
    ) -> ConversionOutcome {
        let span = info_span!("file", file = %input.display());
        let _guard = span.enter();

        let intermediate = intermediate_path(output_dir, input);
        let output = converted_path(output_dir, input);
        let mut outcome = ConversionOutcome {
            input: input.to_path_buf(),
            intermediate: intermediate.clone(),
            output: output.clone(),
            asset_type,
            encoding: StageOutcome::skipped("not started"),
            mapping: StageOutcome::skipped("not started"),
            source_encoding: None,
            unmatched_headers: Vec::new(),
        };

        match fix_encoding(&self.resolver, input, &intermediate) {
            Ok(fix) => {
                debug!(
                    encoding = %fix.conversion.source_encoding,
                    confidence = fix.conversion.confidence,
                    "encoding stage succeeded"
                );
                outcome.encoding = StageOutcome::succeeded(format!(
                    "Encoding fixed successfully (from {})",
                    fix.conversion.source_encoding
                ));
                outcome.source_encoding = Some(fix.conversion.source_encoding);
            }
            Err(error) => {
                warn!(%error, "encoding stage failed");
                outcome.encoding = StageOutcome::failed(error.to_string());
                outcome.mapping = StageOutcome::skipped("encoding stage failed");
                return outcome;
            }
        }

        match convert_file(self.catalog, &intermediate, &output, asset_type) {
            Ok(conversion) => {
                outcome.mapping = StageOutcome::succeeded(format!(
                    "Field names converted successfully ({} headers mapped)",
                    conversion.log.converted_count()
                ));
                outcome.unmatched_headers = conversion.log.unmatched;
                if let Err(error) = std::fs::remove_file(&intermediate) {
                    warn!(
                        path = %intermediate.display(),
                        %error,
                        "could not remove intermediate file"
                    );
                }
            }
            Err(error) => {
                warn!(
                    %error,
                    intermediate = %intermediate.display(),
                    "mapping stage failed, keeping intermediate file"
                );
                outcome.mapping = StageOutcome::failed(error.to_string());
            }
        }
        outcome
    }

    /// Validates each file in order.
    pub fn validate_files(&self, files: &[PathBuf]) -> ValidationSummary {
        validate_files(&self.validator, files)
    }
}

/// Validates each file in order. Unreadable files are recorded, not raised.
pub fn validate_files(validator: &StructuralValidator, files: &[PathBuf]) -> ValidationSummary {
    let details = files
        .iter()
        .map(|file| match validator.validate_file(file) {
            Ok(validation) => ValidationDetail {
                file: file.clone(),
                status: if validation.report.is_valid() {
                    ValidationStatus::Valid
                } else {
                    ValidationStatus::Invalid
                },
                report: Some(validation.report),
                error: None,
            },
            Err(error) => {
                warn!(file = %file.display(), %error, "validation failed");
                ValidationDetail {
                    file: file.clone(),
                    status: ValidationStatus::Error,
                    report: None,
                    error: Some(error.to_string()),
                }
            }
        })
        .collect();
    ValidationSummary { details }
}

/// Validates every `*_converted.csv` in `dir`. Needs no mapping catalog.
pub fn validate_directory(validator: &StructuralValidator, dir: &Path) -> Result<ValidationSummary> {
    let files = discover_files(dir, CONVERTED_PATTERN)
        .with_context(|| format!("discover converted files in {}", dir.display()))?;
    Ok(validate_files(validator, &files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let out = Path::new("/tmp/out");
        let input = Path::new("/data/设备清单.csv");
        assert_eq!(intermediate_path(out, input), out.join("设备清单_temp.csv"));
        assert_eq!(converted_path(out, input), out.join("设备清单_converted.csv"));
    }

    #[test]
    fn test_derived_paths_keep_inner_dots() {
        let out = Path::new("out");
        assert_eq!(
            converted_path(out, Path::new("assets.2025.csv")),
            out.join("assets.2025_converted.csv")
        );
    }
}
