#![deny(unsafe_code)]

use std::fmt;

/// Declared semantic type of a column, using the spellings of the schema
/// document (`str`, `int`, `float`, `bool`, `list`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum SemanticType {
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "list")]
    List,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Str => "str",
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::Bool => "bool",
            SemanticType::List => "list",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of the declarative table specification. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// The ordered column catalog for one logical table.
///
/// Column order here defines the canonical output column order of a
/// normalized table.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TableSpec {
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn required_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|col| col.required)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|col| col.name.as_str())
    }

    /// Coordinate columns come in `*_x`/`*_y` pairs. Returns each declared
    /// pair so the enforcement engine can flag half-present pairs.
    pub fn coordinate_pairs(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .filter_map(|col| col.name.strip_suffix("_x").map(str::to_string))
            .filter_map(|stem| {
                let x = format!("{stem}_x");
                let y = format!("{stem}_y");
                self.contains(&y).then_some((x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str, ty: SemanticType) -> ColumnSpec {
        ColumnSpec {
            name: name.to_string(),
            semantic_type: ty,
            required: false,
            description: String::new(),
        }
    }

    #[test]
    fn coordinate_pairs_are_detected() {
        let spec = TableSpec::new(vec![
            col("from_x", SemanticType::Float),
            col("from_y", SemanticType::Float),
            col("to_x", SemanticType::Float),
            col("start_time", SemanticType::Int),
        ]);
        // to_x has no to_y partner declared, so only from_x/from_y pair up
        assert_eq!(
            spec.coordinate_pairs(),
            vec![("from_x".to_string(), "from_y".to_string())]
        );
    }

    #[test]
    fn semantic_type_uses_schema_spellings() {
        let parsed: SemanticType = serde_json::from_str("\"float\"").unwrap();
        assert_eq!(parsed, SemanticType::Float);
        assert_eq!(serde_json::to_string(&SemanticType::Str).unwrap(), "\"str\"");
    }
}
