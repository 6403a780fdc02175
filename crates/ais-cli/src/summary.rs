use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ais_cli::types::{
    BatchReport, ConversionOutcome, StageOutcome, StageStatus, ValidationStatus,
    ValidationSummary,
};

pub fn print_batch_summary(report: &BatchReport) {
    println!("Asset type: {}", report.asset_type);
    println!("Output: {}", report.output_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Encoding"),
        header_cell("Fields"),
        header_cell("Output"),
        header_cell("Unmapped"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for outcome in &report.outcomes {
        table.add_row(vec![
            file_cell(outcome),
            encoding_cell(outcome),
            stage_cell(&outcome.mapping),
            output_cell(outcome),
            count_cell(outcome.unmatched_headers.len(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} ok", report.successful())),
        dim_cell("-"),
        Cell::new(format!("{:.1}%", report.success_rate())).add_attribute(Attribute::Bold),
        count_cell(report.failed(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_validation_summary(summary: &ValidationSummary) {
    if summary.details.is_empty() {
        println!("No converted files to validate.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Fields"),
        header_cell("Issues"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for detail in &summary.details {
        let (fields, issues) = match (&detail.report, &detail.error) {
            (Some(report), _) => (
                Cell::new(report.field_count()),
                issues_cell(&report.issues.iter().map(ToString::to_string).collect::<Vec<_>>()),
            ),
            (None, Some(error)) => (dim_cell("-"), Cell::new(error).fg(Color::Red)),
            (None, None) => (dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(detail.file_name()),
            validation_cell(detail.status),
            fields,
            issues,
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_cell(outcome: &ConversionOutcome) -> Cell {
    let cell = Cell::new(outcome.input_name());
    if outcome.overall_success() {
        cell
    } else {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn encoding_cell(outcome: &ConversionOutcome) -> Cell {
    match (&outcome.source_encoding, outcome.encoding.status) {
        (Some(name), StageStatus::Succeeded) => Cell::new(name),
        _ => stage_cell(&outcome.encoding),
    }
}

fn stage_cell(stage: &StageOutcome) -> Cell {
    match stage.status {
        StageStatus::Succeeded => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        StageStatus::Failed => Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        StageStatus::Skipped => dim_cell(stage.status.label()),
    }
}

fn output_cell(outcome: &ConversionOutcome) -> Cell {
    if outcome.overall_success() {
        Cell::new(outcome.output_name())
    } else if outcome.encoding.status == StageStatus::Failed {
        Cell::new(&outcome.encoding.message).fg(Color::Red)
    } else {
        Cell::new(&outcome.mapping.message).fg(Color::Red)
    }
}

fn validation_cell(status: ValidationStatus) -> Cell {
    match status {
        ValidationStatus::Valid => Cell::new(status.label()).fg(Color::Green),
        ValidationStatus::Invalid => Cell::new(status.label()).fg(Color::Yellow),
        ValidationStatus::Error => Cell::new(status.label())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn issues_cell(issues: &[String]) -> Cell {
    if issues.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(issues.join("\n")).fg(Color::Yellow)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
