#![deny(unsafe_code)]

use std::fs;
use std::path::Path;

use tracing::debug;

use triptab_model::RawTable;

use crate::error::IngestError;

/// Reads a JSON array of row objects into a raw table.
///
/// Values keep their JSON shape: numbers arrive as ints or floats, `null`
/// and absent keys both mean missing, arrays become structured lists.
pub fn read_json_table(path: &Path) -> Result<RawTable, IngestError> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = raw_table_from_json(&text).map_err(|error| match error {
        IngestError::Json { source, .. } => IngestError::Json {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    debug!(path = %path.display(), rows = table.rows.len(), "json table loaded");
    Ok(table)
}

/// Parses in-memory JSON text into a raw table.
pub fn raw_table_from_json(text: &str) -> Result<RawTable, IngestError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| IngestError::Json {
            path: Default::default(),
            source,
        })?;
    if !value.is_array() {
        return Err(IngestError::NotAnArray {
            found: json_kind(&value).to_string(),
        });
    }
    serde_json::from_value(value).map_err(|source| IngestError::Json {
        path: Default::default(),
        source,
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
