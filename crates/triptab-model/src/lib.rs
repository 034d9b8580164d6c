#![deny(unsafe_code)]

pub mod error;
pub mod names;
pub mod report;
pub mod spec;
pub mod table;
pub mod value;

pub use error::ModelError;
pub use names::TableName;
pub use report::{IssueKind, Severity, ValidationIssue, ValidationReport};
pub use spec::{ColumnSpec, SemanticType, TableSpec};
pub use table::{RawRow, RawTable, Row, Table};
pub use value::{RawValue, TypedValue};
