use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use triptab_model::{Severity, TableName, TableSpec, ValidationIssue};
use triptab_validate::ScenarioValidation;

pub fn print_summary(result: &ScenarioValidation) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, normalized) in [
        (TableName::Trips, &result.tables.trips),
        (TableName::Legs, &result.tables.legs),
        (TableName::Links, &result.tables.links),
    ] {
        table.add_row(vec![
            Cell::new(name.as_str()).add_attribute(Attribute::Bold),
            Cell::new(normalized.len()),
            Cell::new(normalized.columns.len()),
        ]);
    }
    println!("{table}");

    print_issue_table(&result.report.issues);

    let fatal = result.report.fatal_count();
    let warnings = result.report.warning_count();
    if fatal > 0 {
        println!("{fatal} fatal issue(s), {warnings} warning(s): tables are not usable");
    } else if warnings > 0 {
        println!("{warnings} warning(s), no fatal issues");
    } else {
        println!("no issues found");
    }
}

fn print_issue_table(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut ordered: Vec<&ValidationIssue> = issues.iter().collect();
    ordered.sort_by_key(|issue| {
        (
            issue.severity != Severity::Fatal,
            issue.table,
            issue.row_index,
        )
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Kind"),
        header_cell("Table"),
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in ordered {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.kind.as_str()),
            Cell::new(issue.table.as_str()),
            match issue.row_index {
                Some(index) => Cell::new(index),
                None => dim_cell("-"),
            },
            match &issue.column {
                Some(column) => Cell::new(column),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_schema_table(name: TableName, spec: &TableSpec) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for column in &spec.columns {
        table.add_row(vec![
            Cell::new(&column.name),
            Cell::new(column.semantic_type.as_str()),
            if column.required {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("no")
            },
            Cell::new(&column.description),
        ]);
    }
    println!("{}:", name.as_str());
    println!("{table}");
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Fatal => Cell::new("FATAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).add_attribute(Attribute::Dim)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
