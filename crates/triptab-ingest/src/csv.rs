#![deny(unsafe_code)]

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use triptab_model::{RawRow, RawTable};

use crate::error::IngestError;

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Reads one CSV file into a raw table.
///
/// The first record is the header row. Cells arrive as text; typing them
/// against the schema is the normalizer's job, not the reader's. Empty
/// cells become absent values rather than empty strings, and rows that are
/// entirely empty are skipped.
pub fn read_csv_table(path: &Path) -> Result<RawTable, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut table = RawTable::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let trimmed = cell.trim();
            if header.is_empty() || trimmed.is_empty() {
                continue;
            }
            row = row.set(header.as_str(), trimmed);
        }
        table.push_row(row);
    }

    debug!(path = %path.display(), rows = table.rows.len(), "csv table loaded");
    Ok(table)
}
