#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use triptab_model::{TableName, TableSpec};

use crate::error::SchemaError;

/// The embedded table/column catalog, the authoritative contract for the
/// three logical tables.
///
/// Note the one known quirk of the source schema: `links.link_leave_time` is
/// declared `str` while `link_enter_time` is `int`, although both describe a
/// time in seconds. The declared types are preserved literally; the
/// cross-table checker parses the string form leniently when ordering times.
const TABLES_SPECIFICATION: &str = include_str!("../assets/tables_specification.json");

/// Immutable catalog of table specifications, loaded once at startup.
///
/// Construct explicitly and pass by reference into engine calls; keeping it
/// a value rather than a hidden global lets tests run several catalog
/// versions side by side.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    tables: BTreeMap<TableName, TableSpec>,
}

impl SchemaCatalog {
    /// Loads the catalog embedded in this crate.
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_json_str(TABLES_SPECIFICATION)
    }

    /// Parses a schema document of the form
    /// `{"trips": [...], "legs": [...], "links": [...]}`.
    ///
    /// A malformed document aborts immediately; there is nothing useful the
    /// engine can do without a trustworthy catalog.
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        let document: BTreeMap<String, TableSpec> = serde_json::from_str(raw)?;

        let mut tables = BTreeMap::new();
        for (key, spec) in document {
            let name = TableName::from_str(&key)
                .map_err(|_| SchemaError::UnknownTable(key.clone()))?;
            validate_table_spec(name, &spec)?;
            tables.insert(name, spec);
        }

        for name in TableName::ALL {
            if !tables.contains_key(&name) {
                return Err(SchemaError::MissingTable(name.as_str().to_string()));
            }
        }

        Ok(Self { tables })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SchemaError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Looks up a table spec by name, failing for names outside the fixed
    /// `{trips, legs, links}` set.
    pub fn get_table_spec(&self, table_name: &str) -> Result<&TableSpec, SchemaError> {
        let name = TableName::from_str(table_name)
            .map_err(|_| SchemaError::UnknownTable(table_name.to_string()))?;
        Ok(self.spec(name))
    }

    /// Infallible lookup for callers that already hold a parsed [`TableName`].
    pub fn spec(&self, name: TableName) -> &TableSpec {
        // Construction guarantees all three tables are present.
        &self.tables[&name]
    }
}

fn validate_table_spec(name: TableName, spec: &TableSpec) -> Result<(), SchemaError> {
    if spec.columns.is_empty() {
        return Err(SchemaError::EmptyTable {
            table: name.as_str().to_string(),
        });
    }
    let mut seen = BTreeSet::new();
    for column in &spec.columns {
        if !seen.insert(column.name.as_str()) {
            return Err(SchemaError::DuplicateColumn {
                table: name.as_str().to_string(),
                column: column.name.clone(),
            });
        }
    }
    Ok(())
}
