#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::{RawValue, TableName, TypedValue};

/// A raw input row: column name to loosely-typed value. Absent columns are
/// simply not present in the map; an explicit `RawValue::Missing` is treated
/// the same as absence.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    pub cells: BTreeMap<String, RawValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Returns the cell value, folding explicit `Missing` into absence.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells.get(column).filter(|value| !value.is_missing())
    }
}

/// Raw tabular input as supplied by an upstream loader. Row order is
/// insertion order and is preserved by normalization.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A normalized row: every populated cell carries a value coerced to its
/// declared type.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub cells: BTreeMap<String, TypedValue>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&TypedValue> {
        self.cells.get(column).filter(|value| !value.is_missing())
    }

    pub fn set(&mut self, column: impl Into<String>, value: TypedValue) {
        self.cells.insert(column.into(), value);
    }
}

/// A normalized table: ordered rows plus the canonical column order
/// (declared columns first, kept unknown columns after).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub name: TableName,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: TableName, columns: Vec<String>) -> Self {
        Self {
            name,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collects the populated values of one column, keyed by row index.
    pub fn column_values(&self, column: &str) -> Vec<(usize, &TypedValue)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| row.get(column).map(|value| (idx, value)))
            .collect()
    }

    /// Converts back into raw form, for re-normalization.
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            rows: self
                .rows
                .iter()
                .map(|row| RawRow {
                    cells: row
                        .cells
                        .iter()
                        .filter(|(_, value)| !value.is_missing())
                        .map(|(name, value)| (name.clone(), value.to_raw()))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_counts_as_absent() {
        let row = RawRow::new()
            .set("person_id", "p1")
            .set("trip_id", RawValue::Missing);
        assert!(row.get("trip_id").is_none());
        assert!(row.get("person_id").is_some());
    }

    #[test]
    fn to_raw_drops_missing_cells() {
        let mut table = Table::new(TableName::Trips, vec!["trip_id".to_string()]);
        let mut row = Row::default();
        row.set("trip_id", TypedValue::Text("t1".to_string()));
        row.set("end_time", TypedValue::Missing);
        table.push_row(row);

        let raw = table.to_raw();
        assert_eq!(raw.rows[0].cells.len(), 1);
        assert_eq!(raw.rows[0].get("trip_id"), Some(&RawValue::Text("t1".into())));
    }
}
