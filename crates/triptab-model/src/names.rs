#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// The fixed set of logical tables the engine knows about.
///
/// Anything outside this set is a structurally impossible request and is
/// rejected with [`ModelError::UnknownTable`] rather than accumulated into a
/// validation report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TableName {
    Trips,
    Legs,
    Links,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Trips => "trips",
            TableName::Legs => "legs",
            TableName::Links => "links",
        }
    }

    pub const ALL: [TableName; 3] = [TableName::Trips, TableName::Legs, TableName::Links];
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = ModelError;

    /// Parses a table name. The `*_df` aliases are accepted for
    /// compatibility with the upstream dataframe-oriented naming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trips" | "trips_df" => Ok(TableName::Trips),
            "legs" | "legs_df" => Ok(TableName::Legs),
            "links" | "links_df" => Ok(TableName::Links),
            _ => Err(ModelError::UnknownTable(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_legacy_names() {
        assert_eq!("trips".parse::<TableName>().unwrap(), TableName::Trips);
        assert_eq!("legs_df".parse::<TableName>().unwrap(), TableName::Legs);
        assert_eq!(" LINKS ".parse::<TableName>().unwrap(), TableName::Links);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            "network".parse::<TableName>(),
            Err(ModelError::UnknownTable(_))
        ));
    }
}
