#![deny(unsafe_code)]

use tracing::info;

use triptab_model::{RawTable, Table, TableName, ValidationReport};
use triptab_schema::SchemaCatalog;

use crate::cross::{CrossCheckOptions, check_scenario};
use crate::normalize::{NormalizeOptions, Normalizer};

/// The three normalized tables of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioTables {
    pub trips: Table,
    pub legs: Table,
    pub links: Table,
}

/// Outcome of a full scenario validation: normalized tables plus every
/// issue found during normalization and cross-table checking.
///
/// Fatal issues mean the tables must not be trusted for downstream
/// referential use; non-fatal tables may still be partially usable.
#[derive(Debug, Clone)]
pub struct ScenarioValidation {
    pub tables: ScenarioTables,
    pub report: ValidationReport,
}

impl ScenarioValidation {
    pub fn is_usable(&self) -> bool {
        !self.report.has_fatal_issues()
    }
}

/// Normalizes the three tables independently, then runs the cross-table
/// checker over the joined result.
///
/// The per-table passes share no mutable state and could equally run on
/// separate worker threads; the only ordering requirement is the barrier
/// before `check_scenario`.
pub fn validate_scenario(
    catalog: &SchemaCatalog,
    trips: &RawTable,
    legs: &RawTable,
    links: &RawTable,
    normalize_options: NormalizeOptions,
    cross_options: &CrossCheckOptions,
) -> ScenarioValidation {
    let normalizer = Normalizer::new(catalog, normalize_options);

    let (trips, trips_report) = normalizer.normalize(TableName::Trips, trips);
    let (legs, legs_report) = normalizer.normalize(TableName::Legs, legs);
    let (links, links_report) = normalizer.normalize(TableName::Links, links);

    let mut report = ValidationReport::new();
    report.merge(trips_report);
    report.merge(legs_report);
    report.merge(links_report);
    report.merge(check_scenario(&trips, &legs, &links, cross_options));

    info!(
        trips = trips.len(),
        legs = legs.len(),
        links = links.len(),
        fatal = report.fatal_count(),
        warnings = report.warning_count(),
        "scenario validated"
    );

    ScenarioValidation {
        tables: ScenarioTables { trips, legs, links },
        report,
    }
}
