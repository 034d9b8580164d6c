#![deny(unsafe_code)]

use std::collections::BTreeSet;

use tracing::debug;

use triptab_model::{
    IssueKind, RawRow, RawTable, RawValue, Row, Table, TableName, TableSpec, TypedValue,
    ValidationIssue, ValidationReport,
};
use triptab_schema::SchemaCatalog;

use crate::coerce::coerce;
use crate::keygen::KeyGenerator;

/// What to do with input columns that are not declared in the table spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownColumnPolicy {
    /// Pass unknown columns through unchanged, after the declared columns.
    #[default]
    Keep,
    /// Drop unknown columns from the normalized output.
    Drop,
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub unknown_columns: UnknownColumnPolicy,
    /// Separator used when a delimited string is coerced to a list column.
    pub list_separator: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            unknown_columns: UnknownColumnPolicy::default(),
            list_separator: ",".to_string(),
        }
    }
}

/// The identifier column the engine may auto-generate for a table.
///
/// `legs.trip_id` is required but deliberately not in this set: the schema
/// declares no inference rule for it, so its absence is a hard per-row
/// failure.
fn auto_generated_column(table: TableName) -> Option<&'static str> {
    match table {
        TableName::Trips => Some("trip_id"),
        TableName::Legs => Some("leg_id"),
        TableName::Links => None,
    }
}

/// Column Enforcement Engine.
///
/// Normalizes one raw table at a time against the immutable schema catalog.
/// Holds no state across calls, so the three tables of a scenario can be
/// normalized independently (and concurrently) before the cross-table
/// checker runs over the joined result.
#[derive(Debug)]
pub struct Normalizer<'a> {
    catalog: &'a SchemaCatalog,
    options: NormalizeOptions,
}

impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a SchemaCatalog, options: NormalizeOptions) -> Self {
        Self { catalog, options }
    }

    pub fn with_defaults(catalog: &'a SchemaCatalog) -> Self {
        Self::new(catalog, NormalizeOptions::default())
    }

    /// Normalizes a raw table, returning the normalized table together with
    /// every issue found. Malformed rows and cells are reported, never
    /// skipped over silently, and never abort the rest of the table.
    pub fn normalize(&self, table: TableName, raw: &RawTable) -> (Table, ValidationReport) {
        let spec = self.catalog.spec(table);
        let mut report = ValidationReport::new();

        debug!(table = %table, rows = raw.len(), "normalizing table");

        let unknown_columns = collect_unknown_columns(raw, spec);
        for column in &unknown_columns {
            report.push(
                ValidationIssue::new(
                    IssueKind::UnknownColumn,
                    table,
                    format!("column {column} is not declared in the {table} table spec"),
                )
                .in_column(column.clone()),
            );
        }

        let auto_column = auto_generated_column(table);
        let mut keygen =
            auto_column.map(|column| KeyGenerator::new(existing_key_values(raw, column)));

        let coordinate_pairs = spec.coordinate_pairs();

        let mut out = Table::new(table, output_columns(spec, &unknown_columns, &self.options));
        for (row_index, raw_row) in raw.rows.iter().enumerate() {
            let mut row = Row::default();

            for column in &spec.columns {
                match raw_row.get(&column.name) {
                    Some(value) => {
                        match coerce(value, column.semantic_type, &self.options.list_separator) {
                            Ok(typed) => row.set(column.name.clone(), typed),
                            Err(error) => report.push(
                                ValidationIssue::new(IssueKind::TypeCoercion, table, error.to_string())
                                    .at_row(row_index)
                                    .in_column(column.name.clone()),
                            ),
                        }
                    }
                    None => {
                        if auto_column == Some(column.name.as_str())
                            && let Some(generator) = keygen.as_mut()
                        {
                            row.set(column.name.clone(), TypedValue::Text(generator.generate()));
                        } else if column.required {
                            report.push(
                                ValidationIssue::new(
                                    IssueKind::MissingRequiredColumn,
                                    table,
                                    format!(
                                        "required column {} is absent and cannot be generated",
                                        column.name
                                    ),
                                )
                                .at_row(row_index)
                                .in_column(column.name.clone()),
                            );
                        }
                    }
                }
            }

            for (x, y) in &coordinate_pairs {
                let has_x = row.get(x).is_some();
                let has_y = row.get(y).is_some();
                if has_x != has_y {
                    let missing = if has_x { y } else { x };
                    report.push(
                        ValidationIssue::new(
                            IssueKind::CoordinatePair,
                            table,
                            format!("coordinate pair {x}/{y} is only half populated"),
                        )
                        .at_row(row_index)
                        .in_column(missing.clone()),
                    );
                }
            }

            if self.options.unknown_columns == UnknownColumnPolicy::Keep {
                for column in &unknown_columns {
                    if let Some(value) = raw_row.get(column) {
                        row.set(column.clone(), passthrough(value));
                    }
                }
            }

            out.push_row(row);
        }

        debug!(
            table = %table,
            rows = out.len(),
            fatal = report.fatal_count(),
            warnings = report.warning_count(),
            "table normalized"
        );

        (out, report)
    }
}

/// Unknown columns in first-seen order across the raw rows. A column whose
/// every cell is an explicit `Missing` counts as absent, matching
/// [`RawRow::get`] semantics.
fn collect_unknown_columns(raw: &RawTable, spec: &TableSpec) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut unknown = Vec::new();
    for row in &raw.rows {
        for (name, value) in &row.cells {
            if value.is_missing() {
                continue;
            }
            if !spec.contains(name) && seen.insert(name.clone()) {
                unknown.push(name.clone());
            }
        }
    }
    unknown
}

/// Every explicit identifier already present in the column, in its textual
/// form. Seeds the surrogate key generator so generated keys cannot collide.
fn existing_key_values(raw: &RawTable, column: &str) -> BTreeSet<String> {
    raw.rows
        .iter()
        .filter_map(|row: &RawRow| row.get(column))
        .filter_map(RawValue::scalar_text)
        .collect()
}

fn output_columns(
    spec: &TableSpec,
    unknown: &[String],
    options: &NormalizeOptions,
) -> Vec<String> {
    let mut columns: Vec<String> = spec.column_names().map(str::to_string).collect();
    if options.unknown_columns == UnknownColumnPolicy::Keep {
        columns.extend(unknown.iter().cloned());
    }
    columns
}

/// Unknown columns are not coerced; their values pass through with the
/// closest typed representation. Nested sequences flatten to their scalar
/// leaves so no element is blanked or dropped.
fn passthrough(raw: &RawValue) -> TypedValue {
    match raw {
        RawValue::Missing => TypedValue::Missing,
        RawValue::Bool(b) => TypedValue::Bool(*b),
        RawValue::Int(i) => TypedValue::Int(*i),
        RawValue::Float(f) => TypedValue::Float(*f),
        RawValue::Text(s) => TypedValue::Text(s.clone()),
        RawValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            flatten_list(items, &mut out);
            TypedValue::List(out)
        }
    }
}

fn flatten_list(items: &[RawValue], out: &mut Vec<String>) {
    for item in items {
        match item {
            RawValue::List(nested) => flatten_list(nested, out),
            other => {
                if let Some(text) = other.scalar_text() {
                    out.push(text);
                }
            }
        }
    }
}
