//! Tests for the schema catalog against the embedded specification.

use triptab_model::{SemanticType, TableName};
use triptab_schema::{SchemaCatalog, SchemaError};

#[test]
fn lookup_by_name_and_alias() {
    let catalog = SchemaCatalog::builtin().unwrap();
    assert!(catalog.get_table_spec("trips").is_ok());
    assert!(catalog.get_table_spec("legs_df").is_ok());
    assert!(matches!(
        catalog.get_table_spec("network"),
        Err(SchemaError::UnknownTable(_))
    ));
}

#[test]
fn trip_id_is_the_only_required_trips_column() {
    let catalog = SchemaCatalog::builtin().unwrap();
    let required: Vec<&str> = catalog
        .spec(TableName::Trips)
        .required_columns()
        .map(|col| col.name.as_str())
        .collect();
    assert_eq!(required, vec!["trip_id"]);
}

#[test]
fn trip_id_is_the_only_required_legs_column() {
    let catalog = SchemaCatalog::builtin().unwrap();
    let required: Vec<&str> = catalog
        .spec(TableName::Legs)
        .required_columns()
        .map(|col| col.name.as_str())
        .collect();
    assert_eq!(required, vec!["trip_id"]);
}

#[test]
fn links_has_no_required_columns() {
    let catalog = SchemaCatalog::builtin().unwrap();
    assert_eq!(catalog.spec(TableName::Links).required_columns().count(), 0);
}

// The source schema declares link_leave_time as str while link_enter_time is
// int. The declared types are preserved literally rather than silently fixed.
#[test]
fn link_time_type_asymmetry_is_preserved() {
    let catalog = SchemaCatalog::builtin().unwrap();
    let links = catalog.spec(TableName::Links);
    assert_eq!(
        links.column("link_enter_time").unwrap().semantic_type,
        SemanticType::Int
    );
    assert_eq!(
        links.column("link_leave_time").unwrap().semantic_type,
        SemanticType::Str
    );
}

#[test]
fn column_order_is_declaration_order() {
    let catalog = SchemaCatalog::builtin().unwrap();
    let names: Vec<&str> = catalog.spec(TableName::Trips).column_names().collect();
    assert_eq!(names.first().copied(), Some("trip_id"));
    assert_eq!(names.last().copied(), Some("legs_count"));
}

#[test]
fn missing_table_is_rejected() {
    let raw = r#"{
        "trips": [{"name": "trip_id", "type": "str", "required": true, "description": ""}],
        "legs": [{"name": "trip_id", "type": "str", "required": true, "description": ""}]
    }"#;
    assert!(matches!(
        SchemaCatalog::from_json_str(raw),
        Err(SchemaError::MissingTable(_))
    ));
}

#[test]
fn coordinate_pairs_cover_all_three_tables() {
    let catalog = SchemaCatalog::builtin().unwrap();
    assert_eq!(
        catalog.spec(TableName::Trips).coordinate_pairs().len(),
        2 // from_x/from_y, to_x/to_y
    );
    assert_eq!(catalog.spec(TableName::Legs).coordinate_pairs().len(), 2);
    assert_eq!(
        catalog.spec(TableName::Links).coordinate_pairs().len(),
        2 // link_enter_x/y, link_leave_x/y
    );
}
