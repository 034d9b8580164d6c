#![deny(unsafe_code)]

//! Schema enforcement and normalization engine for trips/legs/links tables.
//!
//! The engine takes raw, loosely-structured tabular input, enforces the
//! declarative schema from `triptab-schema`, fills in the two derivable
//! identifier columns, and checks referential integrity across the three
//! tables. All per-row and per-cell findings accumulate into a
//! [`ValidationReport`](triptab_model::ValidationReport) instead of aborting,
//! so one malformed row never prevents validation of the rest.

pub mod coerce;
pub mod cross;
pub mod engine;
pub mod keygen;
pub mod normalize;

pub use coerce::{CoercionError, coerce};
pub use cross::{CrossCheckOptions, check_scenario};
pub use engine::{ScenarioTables, ScenarioValidation, validate_scenario};
pub use keygen::KeyGenerator;
pub use normalize::{NormalizeOptions, Normalizer, UnknownColumnPolicy};
