//! Plain-text rendering of pipeline results.
//!
//! Rendering is kept apart from the pipeline so the same outcomes can be
//! written to a report file, printed, or inspected in tests.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use ais_map::ConversionReport;
use ais_validate::FileValidation;

use crate::types::{BatchReport, StageStatus, ValidationStatus, ValidationSummary};

/// Default file name of the batch report inside the output directory.
pub const REPORT_FILE_NAME: &str = "conversion_report.txt";

fn rule(out: &mut String, ch: char, width: usize) {
    out.extend(std::iter::repeat_n(ch, width));
    out.push('\n');
}

/// Renders the batch report: counts, per-file dispositions and next steps.
pub fn render_batch_report(report: &BatchReport) -> String {
    let mut out = String::new();
    out.push_str("Batch Conversion Report\n");
    rule(&mut out, '=', 50);
    out.push('\n');
    let _ = writeln!(out, "Asset type: {}", report.asset_type);
    let _ = writeln!(out, "Total files processed: {}", report.total());
    let _ = writeln!(out, "Successful conversions: {}", report.successful());
    let _ = writeln!(out, "Failed conversions: {}", report.failed());
    let _ = writeln!(out, "Success rate: {:.1}%", report.success_rate());
    out.push('\n');

    if report.successful() > 0 {
        out.push_str("Successfully Converted Files:\n");
        rule(&mut out, '-', 30);
        for outcome in report.outcomes.iter().filter(|o| o.overall_success()) {
            let _ = writeln!(out, "✓ {} → {}", outcome.input_name(), outcome.output_name());
            if !outcome.unmatched_headers.is_empty() {
                let _ = writeln!(
                    out,
                    "  Unmapped headers: {}",
                    outcome.unmatched_headers.join(", ")
                );
            }
        }
        out.push('\n');
    }

    if report.failed() > 0 {
        out.push_str("Failed Conversions:\n");
        rule(&mut out, '-', 20);
        for outcome in report.outcomes.iter().filter(|o| !o.overall_success()) {
            let _ = writeln!(out, "✗ {}", outcome.input_name());
            if outcome.encoding.status == StageStatus::Failed {
                let _ = writeln!(out, "  Encoding error: {}", outcome.encoding.message);
            } else if outcome.mapping.status == StageStatus::Failed {
                let _ = writeln!(out, "  Field conversion error: {}", outcome.mapping.message);
                let _ = writeln!(
                    out,
                    "  Intermediate file kept: {}",
                    outcome.intermediate.display()
                );
            }
        }
        out.push('\n');
    }

    out.push_str("Next Steps:\n");
    rule(&mut out, '-', 10);
    if report.successful() > 0 {
        out.push_str("1. Review converted files in the output directory\n");
        out.push_str("2. Validate the converted CSV files before importing\n");
        out.push_str("3. Import the files to Snipe-IT using web interface or command line\n");
    }
    if report.failed() > 0 {
        out.push_str("4. Review and fix the failed conversions manually\n");
        out.push_str("5. Check the error messages for specific issues\n");
    }
    out
}

/// Renders the report file contents: the batch report followed by the
/// validation results of the converted outputs.
pub fn render_saved_report(report: &BatchReport) -> String {
    format!(
        "{}\n{}",
        render_batch_report(report),
        render_validation_summary(&report.validation, false)
    )
}

/// Renders validation counts. With `list_all`, every file is listed;
/// otherwise only the ones that are not valid.
pub fn render_validation_summary(summary: &ValidationSummary, list_all: bool) -> String {
    let mut out = String::new();
    out.push_str("Validation Results:\n");
    let _ = writeln!(out, "Total files validated: {}", summary.total());
    let _ = writeln!(out, "Valid files: {}", summary.valid());
    let _ = writeln!(out, "Invalid files: {}", summary.invalid());

    let listed: Vec<_> = summary
        .details
        .iter()
        .filter(|detail| list_all || detail.status != ValidationStatus::Valid)
        .collect();
    if listed.is_empty() {
        return out;
    }
    out.push('\n');
    if !list_all {
        out.push_str("Invalid files:\n");
    }
    for detail in listed {
        let icon = if detail.status == ValidationStatus::Valid {
            "✓"
        } else {
            "✗"
        };
        let _ = writeln!(
            out,
            "  {icon} {}: {}",
            detail.file_name(),
            detail.status.label()
        );
        if let Some(report) = &detail.report {
            for issue in &report.issues {
                let _ = writeln!(out, "      - {issue}");
            }
        }
        if let Some(error) = &detail.error {
            let _ = writeln!(out, "      - {error}");
        }
    }
    out
}

/// Renders the report for one validated file.
pub fn render_file_validation(validation: &FileValidation) -> String {
    let report = &validation.report;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "CSV Validation Report for: {}",
        validation.path.display()
    );
    let _ = writeln!(out, "Encoding: {}", validation.encoding);
    let _ = writeln!(out, "Total fields: {}", report.field_count());
    let _ = writeln!(out, "Fields: {}", report.header.join(", "));
    out.push('\n');

    let missing: Vec<&str> = report.missing_required().collect();
    if !missing.is_empty() {
        let _ = writeln!(out, "Missing required fields: {}", missing.join(", "));
    }
    let issues: Vec<_> = report.structural_issues().collect();
    if issues.is_empty() {
        out.push_str("No issues found.\n");
    } else {
        out.push_str("Issues found:\n");
        for issue in issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }
    let _ = writeln!(
        out,
        "Result: {}",
        if report.is_valid() { "valid" } else { "invalid" }
    );
    out
}

/// Renders the outcome of a single-file conversion.
pub fn render_conversion(report: &ConversionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Successfully converted {} to {}",
        report.input.display(),
        report.output.display()
    );
    let _ = writeln!(
        out,
        "Encoding: {} (confidence {:.2})",
        report.encoding, report.confidence
    );
    let _ = writeln!(
        out,
        "Rows: {}, columns: {}",
        report.data_rows, report.columns
    );
    if !report.log.entries.is_empty() {
        out.push_str("Field mappings:\n");
        for entry in &report.log.entries {
            let _ = writeln!(
                out,
                "  {}. {} → {} ({})",
                entry.column, entry.original, entry.canonical, entry.strategy
            );
        }
    }
    if !report.log.unmatched.is_empty() {
        let _ = writeln!(
            out,
            "Warning: no mapping for {}",
            report.log.unmatched.join(", ")
        );
    }
    out
}

/// Writes rendered text to `path`.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("write report {}", path.display()))
}
