use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use triptab_ingest::{read_csv_table, read_json_table};
use triptab_model::{RawTable, TableName};
use triptab_schema::SchemaCatalog;
use triptab_validate::{
    CrossCheckOptions, NormalizeOptions, ScenarioValidation, UnknownColumnPolicy,
    validate_scenario,
};

use crate::cli::{CheckArgs, SchemaArgs};
use crate::summary::print_schema_table;

pub fn run_check(args: &CheckArgs) -> Result<ScenarioValidation> {
    let catalog = load_catalog(args.schema.as_deref())?;

    let trips = load_table(&args.trips)?;
    let legs = load_table(&args.legs)?;
    let links = load_table(&args.links)?;
    info!(
        trips = trips.len(),
        legs = legs.len(),
        links = links.len(),
        "tables loaded"
    );

    let normalize_options = NormalizeOptions {
        unknown_columns: if args.drop_unknown_columns {
            UnknownColumnPolicy::Drop
        } else {
            UnknownColumnPolicy::Keep
        },
        list_separator: args.list_separator.clone(),
    };
    let cross_options = CrossCheckOptions {
        pt_modes: parse_pt_modes(args.pt_modes.as_deref()),
    };

    let result = validate_scenario(
        &catalog,
        &trips,
        &legs,
        &links,
        normalize_options,
        &cross_options,
    );

    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&result.report)
            .context("serialize validation report")?;
        fs::write(path, json)
            .with_context(|| format!("write report: {}", path.display()))?;
    }

    Ok(result)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let catalog = SchemaCatalog::builtin().context("load built-in schema catalog")?;
    let tables: Vec<TableName> = match &args.table {
        Some(name) => vec![name.parse()?],
        None => TableName::ALL.to_vec(),
    };
    for name in tables {
        print_schema_table(name, catalog.spec(name));
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<SchemaCatalog> {
    match path {
        Some(path) => SchemaCatalog::from_json_file(path)
            .with_context(|| format!("load schema catalog: {}", path.display())),
        None => SchemaCatalog::builtin().context("load built-in schema catalog"),
    }
}

/// Picks the loader from the file extension: `.json` means a JSON array of
/// row objects, anything else is read as CSV.
fn load_table(path: &Path) -> Result<RawTable> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let table = if is_json {
        read_json_table(path)?
    } else {
        read_csv_table(path)?
    };
    Ok(table)
}

fn parse_pt_modes(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|modes| {
        modes
            .split(',')
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
