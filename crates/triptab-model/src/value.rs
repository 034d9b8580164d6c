#![deny(unsafe_code)]

/// A raw cell value as supplied by an upstream loader.
///
/// Raw tables are loosely typed: a cell may be absent, carry a scalar of any
/// shape, or a structured sequence. The untagged serde representation lets a
/// raw table deserialize directly from a JSON array of objects.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<RawValue>),
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    /// Canonical textual form of a scalar. Lists and missing cells have no
    /// scalar rendering and return `None`.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Int(i) => Some(i.to_string()),
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Missing | RawValue::List(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// A cell value after type coercion against the declared column type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum TypedValue {
    Missing,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
}

impl TypedValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, TypedValue::Missing)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TypedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts back into the raw representation, for feeding a normalized
    /// table through normalization again.
    pub fn to_raw(&self) -> RawValue {
        match self {
            TypedValue::Missing => RawValue::Missing,
            TypedValue::Text(s) => RawValue::Text(s.clone()),
            TypedValue::Int(i) => RawValue::Int(*i),
            TypedValue::Float(f) => RawValue::Float(*f),
            TypedValue::Bool(b) => RawValue::Bool(*b),
            TypedValue::List(items) => {
                RawValue::List(items.iter().map(|s| RawValue::Text(s.clone())).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_text_renders_canonical_forms() {
        assert_eq!(RawValue::Bool(true).scalar_text().as_deref(), Some("true"));
        assert_eq!(RawValue::Int(300).scalar_text().as_deref(), Some("300"));
        assert_eq!(RawValue::Text("p1".into()).scalar_text().as_deref(), Some("p1"));
        assert_eq!(RawValue::Missing.scalar_text(), None);
        assert_eq!(RawValue::List(vec![]).scalar_text(), None);
    }

    #[test]
    fn typed_round_trips_through_raw() {
        let typed = TypedValue::List(vec!["walk".to_string(), "pt".to_string()]);
        let raw = typed.to_raw();
        assert_eq!(
            raw,
            RawValue::List(vec![RawValue::Text("walk".into()), RawValue::Text("pt".into())])
        );
    }
}
