#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use triptab_model::{IssueKind, Row, Table, TableName, ValidationIssue, ValidationReport};

/// Options for the cross-table checks.
#[derive(Debug, Clone, Default)]
pub struct CrossCheckOptions {
    /// Modes whose links rows represent public-transit vehicles and must
    /// therefore reference a line. When empty, the line check is skipped.
    pub pt_modes: BTreeSet<String>,
}

/// Cross-Table Integrity Checker.
///
/// Runs strictly after all three tables are individually normalized; only
/// classifies and reports, never mutates. Rows whose keys are already
/// missing (reported during normalization) are skipped here rather than
/// reported twice.
pub fn check_scenario(
    trips: &Table,
    legs: &Table,
    links: &Table,
    options: &CrossCheckOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_duplicate_keys(trips, "trip_id", &mut report);
    check_duplicate_keys(legs, "leg_id", &mut report);
    check_leg_references(trips, legs, &mut report);
    check_leg_counts(trips, legs, &mut report);
    check_trip_leg_times(trips, &mut report);
    check_trip_leg_times(legs, &mut report);
    check_link_times(links, &mut report);
    check_line_references(links, options, &mut report);

    debug!(
        fatal = report.fatal_count(),
        warnings = report.warning_count(),
        "cross-table checks complete"
    );

    report
}

fn key_text(row: &Row, column: &str) -> Option<String> {
    row.get(column).and_then(|value| value.as_text()).map(str::to_string)
}

/// Duplicate identifiers after normalization are fatal; the later
/// occurrence is the one reported.
fn check_duplicate_keys(table: &Table, column: &str, report: &mut ValidationReport) {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    for (row_index, row) in table.rows.iter().enumerate() {
        let Some(key) = key_text(row, column) else {
            continue;
        };
        if !seen.insert(key.clone()) {
            report.push(
                ValidationIssue::new(
                    IssueKind::DuplicateKey,
                    table.name,
                    format!("{column} {key:?} appears more than once"),
                )
                .at_row(row_index)
                .in_column(column.to_string()),
            );
        }
    }
}

/// Every leg must reference an existing trip, and where both sides carry a
/// person identifier the two must agree.
fn check_leg_references(trips: &Table, legs: &Table, report: &mut ValidationReport) {
    let trips_by_id: BTreeMap<String, &Row> = trips
        .rows
        .iter()
        .filter_map(|row| key_text(row, "trip_id").map(|id| (id, row)))
        .collect();

    for (row_index, leg) in legs.rows.iter().enumerate() {
        let Some(trip_id) = key_text(leg, "trip_id") else {
            // Absence was already reported as a missing required column.
            continue;
        };
        let Some(trip) = trips_by_id.get(&trip_id) else {
            report.push(
                ValidationIssue::new(
                    IssueKind::OrphanReference,
                    TableName::Legs,
                    format!("trip_id {trip_id:?} has no matching trips row"),
                )
                .at_row(row_index)
                .in_column("trip_id".to_string()),
            );
            continue;
        };

        if let (Some(leg_person), Some(trip_person)) =
            (key_text(leg, "person_id"), key_text(trip, "person_id"))
            && leg_person != trip_person
        {
            report.push(
                ValidationIssue::new(
                    IssueKind::PersonMismatch,
                    TableName::Legs,
                    format!(
                        "leg person_id {leg_person:?} disagrees with trip {trip_id:?} person_id {trip_person:?}"
                    ),
                )
                .at_row(row_index)
                .in_column("person_id".to_string()),
            );
        }
    }
}

/// `trips.legs_count`, when populated, must equal the actual number of legs
/// rows referencing that trip. Disagreement is a warning, not fatal.
fn check_leg_counts(trips: &Table, legs: &Table, report: &mut ValidationReport) {
    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
    for leg in &legs.rows {
        if let Some(trip_id) = key_text(leg, "trip_id") {
            *counts.entry(trip_id).or_default() += 1;
        }
    }

    for (row_index, trip) in trips.rows.iter().enumerate() {
        let Some(declared) = trip.get("legs_count").and_then(|value| value.as_int()) else {
            continue;
        };
        let Some(trip_id) = key_text(trip, "trip_id") else {
            continue;
        };
        let actual = counts.get(&trip_id).copied().unwrap_or(0);
        if declared != actual {
            report.push(
                ValidationIssue::new(
                    IssueKind::LegCountMismatch,
                    TableName::Trips,
                    format!(
                        "trip {trip_id:?} declares {declared} legs but {actual} legs rows reference it"
                    ),
                )
                .at_row(row_index)
                .in_column("legs_count".to_string()),
            );
        }
    }
}

/// Times are seconds since local midnight and must be non-negative, with
/// `end_time >= start_time` wherever both are present on the same row.
fn check_trip_leg_times(table: &Table, report: &mut ValidationReport) {
    for (row_index, row) in table.rows.iter().enumerate() {
        let start = row.get("start_time").and_then(|value| value.as_int());
        let end = row.get("end_time").and_then(|value| value.as_int());

        for (column, value) in [("start_time", start), ("end_time", end)] {
            if let Some(seconds) = value
                && seconds < 0
            {
                report.push(
                    ValidationIssue::new(
                        IssueKind::TimeOrder,
                        table.name,
                        format!("{column} is negative ({seconds})"),
                    )
                    .at_row(row_index)
                    .in_column(column.to_string()),
                );
            }
        }

        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            report.push(
                ValidationIssue::new(
                    IssueKind::TimeOrder,
                    table.name,
                    format!("end_time {end} precedes start_time {start}"),
                )
                .at_row(row_index)
                .in_column("end_time".to_string()),
            );
        }
    }
}

/// Link traversal times. `link_leave_time` is declared `str` in the schema,
/// so it only takes part in the ordering check when it parses as an integer.
fn check_link_times(links: &Table, report: &mut ValidationReport) {
    for (row_index, row) in links.rows.iter().enumerate() {
        let enter = row.get("link_enter_time").and_then(|value| value.as_int());
        let leave = row
            .get("link_leave_time")
            .and_then(|value| value.as_text())
            .and_then(|text| text.trim().parse::<i64>().ok());

        if let Some(seconds) = enter
            && seconds < 0
        {
            report.push(
                ValidationIssue::new(
                    IssueKind::TimeOrder,
                    TableName::Links,
                    format!("link_enter_time is negative ({seconds})"),
                )
                .at_row(row_index)
                .in_column("link_enter_time".to_string()),
            );
        }
        if let Some(seconds) = leave
            && seconds < 0
        {
            report.push(
                ValidationIssue::new(
                    IssueKind::TimeOrder,
                    TableName::Links,
                    format!("link_leave_time is negative ({seconds})"),
                )
                .at_row(row_index)
                .in_column("link_leave_time".to_string()),
            );
        }

        if let (Some(enter), Some(leave)) = (enter, leave)
            && leave < enter
        {
            report.push(
                ValidationIssue::new(
                    IssueKind::TimeOrder,
                    TableName::Links,
                    format!("link_leave_time {leave} precedes link_enter_time {enter}"),
                )
                .at_row(row_index)
                .in_column("link_leave_time".to_string()),
            );
        }
    }
}

/// A links row driven by a public-transit vehicle should reference a line.
fn check_line_references(
    links: &Table,
    options: &CrossCheckOptions,
    report: &mut ValidationReport,
) {
    if options.pt_modes.is_empty() {
        return;
    }
    for (row_index, row) in links.rows.iter().enumerate() {
        let Some(mode) = key_text(row, "mode") else {
            continue;
        };
        if options.pt_modes.contains(&mode) && key_text(row, "line_id").is_none() {
            report.push(
                ValidationIssue::new(
                    IssueKind::MissingLineReference,
                    TableName::Links,
                    format!("transit mode {mode:?} row has no line_id"),
                )
                .at_row(row_index)
                .in_column("line_id".to_string()),
            );
        }
    }
}
