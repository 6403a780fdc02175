use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ais_catalog::{AssetType, MappingCatalog};
use ais_cli::pipeline::{BatchOrchestrator, validate_directory};
use ais_cli::report::{
    REPORT_FILE_NAME, render_batch_report, render_conversion, render_file_validation,
    render_saved_report, render_validation_summary, write_report,
};
use ais_cli::types::{BatchReport, ValidationSummary};
use ais_ingest::{
    DetectionProfile, EncodingResolver, convert_to_utf8, fix_encoding, inspect_utf8_file,
    strip_bom_file,
};
use ais_map::{convert_file, generate_template};
use ais_validate::{StructuralValidator, validate_file};

use crate::cli::{EncodingCommand, ProcessArgs};

/// Loads the catalog from `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<MappingCatalog> {
    match path {
        Some(path) => MappingCatalog::load(path)
            .with_context(|| format!("load mapping catalog {}", path.display())),
        None => MappingCatalog::embedded_default().context("load built-in mapping catalog"),
    }
}

pub fn run_process(catalog: &MappingCatalog, args: &ProcessArgs) -> Result<BatchReport> {
    let asset_type = AssetType::from(args.asset_type);
    let span = info_span!("batch", %asset_type);
    let _guard = span.enter();

    let report = BatchOrchestrator::new(catalog).run_directory(
        &args.input_dir,
        &args.output_dir,
        asset_type,
        &args.pattern,
    )?;

    let text = render_batch_report(&report);
    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| args.output_dir.join(REPORT_FILE_NAME));
    write_report(&report_path, &render_saved_report(&report))?;
    info!(path = %report_path.display(), "report written");

    println!("{text}");
    println!("Report saved to: {}", report_path.display());
    Ok(report)
}

pub fn run_validate_dir(dir: &Path) -> Result<ValidationSummary> {
    let summary = validate_directory(&StructuralValidator::new(), dir)?;
    print!("{}", render_validation_summary(&summary, true));
    Ok(summary)
}

/// Converts one file and validates the result. Returns whether the output is
/// structurally valid.
pub fn run_convert(
    catalog: &MappingCatalog,
    input: &Path,
    output: &Path,
    asset_type: AssetType,
) -> Result<bool> {
    let conversion = convert_file(catalog, input, output, asset_type)
        .with_context(|| format!("convert {}", input.display()))?;
    print!("{}", render_conversion(&conversion));

    let validation =
        validate_file(output).with_context(|| format!("validate {}", output.display()))?;
    println!();
    print!("{}", render_file_validation(&validation));
    Ok(validation.report.is_valid())
}

/// Returns whether the file is structurally valid.
pub fn run_validate(input: &Path) -> Result<bool> {
    let validation =
        validate_file(input).with_context(|| format!("validate {}", input.display()))?;
    print!("{}", render_file_validation(&validation));
    Ok(validation.report.is_valid())
}

pub fn run_template(catalog: &MappingCatalog, asset_type: AssetType, output: &Path) -> Result<()> {
    let template = generate_template(catalog, asset_type, output)
        .with_context(|| format!("generate {asset_type} template"))?;
    println!(
        "Template for {} written to {} ({} fields)",
        template.asset_type,
        template.output.display(),
        template.headers.len()
    );
    println!("Fields: {}", template.headers.join(", "));
    Ok(())
}

pub fn run_encoding(command: &EncodingCommand) -> Result<()> {
    let resolver = EncodingResolver::new(DetectionProfile::General);
    match command {
        EncodingCommand::Detect { input } => {
            let bytes =
                std::fs::read(input).with_context(|| format!("read {}", input.display()))?;
            let guess = resolver.detect(&bytes);
            println!("File: {}", input.display());
            println!("Encoding: {}", guess.name);
            println!("Confidence: {:.2}", guess.confidence);
            println!("Method: {:?}", guess.method);
        }
        EncodingCommand::Validate { input } => {
            let report = inspect_utf8_file(input)
                .with_context(|| format!("check UTF-8 of {}", input.display()))?;
            println!("File is valid UTF-8: {}", input.display());
            println!("Byte-order mark: {}", if report.has_bom { "yes" } else { "no" });
            println!("Characters: {}", report.total_chars);
            println!("CJK characters: {}", report.cjk_chars);
        }
        EncodingCommand::Convert {
            input,
            output,
            encoding,
        } => {
            let conversion = convert_to_utf8(&resolver, input, output, encoding.as_deref())
                .with_context(|| format!("convert {} to UTF-8", input.display()))?;
            println!(
                "Converted {} ({}, confidence {:.2}) to {}",
                conversion.input.display(),
                conversion.source_encoding,
                conversion.confidence,
                conversion.output.display()
            );
        }
        EncodingCommand::Fix { input, output } => {
            let fix = fix_encoding(&resolver, input, output)
                .with_context(|| format!("fix encoding of {}", input.display()))?;
            println!(
                "Encoding fixed: {} → {} (from {})",
                input.display(),
                output.display(),
                fix.conversion.source_encoding
            );
            println!(
                "Rows: {}, fields: {}",
                fix.data_rows, fix.header_fields
            );
            println!("Header preview: {}", fix.header_preview.join(", "));
        }
        EncodingCommand::RemoveBom { input } => {
            let removed = strip_bom_file(input)
                .with_context(|| format!("remove byte-order mark from {}", input.display()))?;
            if removed {
                println!("Removed byte-order mark from {}", input.display());
            } else {
                println!("No byte-order mark in {}", input.display());
            }
        }
    }
    Ok(())
}
