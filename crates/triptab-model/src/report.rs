#![deny(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TableName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Warning,
}

/// Every issue the engine can report. Severity is fixed per kind, not
/// configurable per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A required, non-auto-generatable column is absent for a row.
    MissingRequiredColumn,
    /// A cell could not be converted to its declared type.
    TypeCoercion,
    /// A column present in raw input but not declared in the table spec.
    UnknownColumn,
    /// One half of an `*_x`/`*_y` coordinate pair is populated without the other.
    CoordinatePair,
    /// Two rows in the same table share an identifier after normalization.
    DuplicateKey,
    /// A legs row references a trip that does not exist.
    OrphanReference,
    /// An end time precedes the matching start time, or a time is negative.
    TimeOrder,
    /// `trips.legs_count` disagrees with the actual number of matching legs.
    LegCountMismatch,
    /// A leg and its parent trip carry different person identifiers.
    PersonMismatch,
    /// A public-transit links row carries no line identifier.
    MissingLineReference,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::MissingRequiredColumn
            | IssueKind::TypeCoercion
            | IssueKind::DuplicateKey
            | IssueKind::OrphanReference
            | IssueKind::TimeOrder => Severity::Fatal,
            IssueKind::UnknownColumn
            | IssueKind::CoordinatePair
            | IssueKind::LegCountMismatch
            | IssueKind::PersonMismatch
            | IssueKind::MissingLineReference => Severity::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingRequiredColumn => "missing_required_column",
            IssueKind::TypeCoercion => "type_coercion",
            IssueKind::UnknownColumn => "unknown_column",
            IssueKind::CoordinatePair => "coordinate_pair",
            IssueKind::DuplicateKey => "duplicate_key",
            IssueKind::OrphanReference => "orphan_reference",
            IssueKind::TimeOrder => "time_order",
            IssueKind::LegCountMismatch => "leg_count_mismatch",
            IssueKind::PersonMismatch => "person_mismatch",
            IssueKind::MissingLineReference => "missing_line_reference",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub table: TableName,
    /// Row index within the table, when the issue is row-scoped.
    pub row_index: Option<usize>,
    /// Column name, when the issue is column-scoped.
    pub column: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, table: TableName, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            table,
            row_index: None,
            column: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn at_row(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }

    #[must_use]
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Ordered accumulation of validation findings.
///
/// Per-row and per-cell problems are appended here instead of unwinding the
/// call stack, so one malformed row never prevents validation of the rest of
/// the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn fatal_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Fatal)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
            .count()
    }

    /// The single boolean a caller checks to decide whether the normalized
    /// tables can be trusted for downstream referential use.
    pub fn has_fatal_issues(&self) -> bool {
        self.fatal_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_of_kind(&self, kind: IssueKind) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|issue| issue.kind == kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_fixed_per_kind() {
        assert_eq!(IssueKind::OrphanReference.severity(), Severity::Fatal);
        assert_eq!(IssueKind::DuplicateKey.severity(), Severity::Fatal);
        assert_eq!(IssueKind::LegCountMismatch.severity(), Severity::Warning);
        assert_eq!(IssueKind::UnknownColumn.severity(), Severity::Warning);
    }

    #[test]
    fn report_counts_and_fatal_flag() {
        let mut report = ValidationReport::new();
        report.push(ValidationIssue::new(
            IssueKind::UnknownColumn,
            TableName::Trips,
            "unrecognized column",
        ));
        assert!(!report.has_fatal_issues());

        report.push(
            ValidationIssue::new(IssueKind::TypeCoercion, TableName::Legs, "not an int")
                .at_row(3)
                .in_column("travel_time"),
        );
        assert!(report.has_fatal_issues());
        assert_eq!(report.fatal_count(), 1);
        assert_eq!(report.warning_count(), 1);
    }
}
