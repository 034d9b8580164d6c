use std::io::Write;

use triptab_model::RawValue;
use triptab_ingest::{IngestError, raw_table_from_json, read_csv_table, read_json_table};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[test]
fn csv_cells_arrive_as_text_with_empties_absent() {
    let file = write_temp("trip_id,person_id,start_time\nt1,p1,28800\nt2,,30600\n");
    let table = read_csv_table(file.path()).expect("read");

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.rows[0].get("start_time"),
        Some(&RawValue::Text("28800".into()))
    );
    assert!(table.rows[1].get("person_id").is_none());
}

#[test]
fn csv_headers_are_trimmed_and_bom_stripped() {
    let file = write_temp("\u{feff}trip_id, person_id\nt1, p1\n");
    let table = read_csv_table(file.path()).expect("read");

    assert_eq!(table.rows[0].get("trip_id"), Some(&RawValue::Text("t1".into())));
    assert_eq!(table.rows[0].get("person_id"), Some(&RawValue::Text("p1".into())));
}

#[test]
fn csv_blank_lines_are_skipped() {
    let file = write_temp("trip_id\nt1\n,\nt2\n");
    let table = read_csv_table(file.path()).expect("read");
    assert_eq!(table.len(), 2);
}

#[test]
fn json_rows_keep_their_shape() {
    let table = raw_table_from_json(
        r#"[
            {"trip_id": "t1", "start_time": 28800, "routed_distance": 5400.5,
             "contains_drt": false, "all_modes": ["walk", "pt"], "line_id": null}
        ]"#,
    )
    .expect("parse");

    let row = &table.rows[0];
    assert_eq!(row.get("start_time"), Some(&RawValue::Int(28_800)));
    assert_eq!(row.get("routed_distance"), Some(&RawValue::Float(5_400.5)));
    assert_eq!(row.get("contains_drt"), Some(&RawValue::Bool(false)));
    assert_eq!(
        row.get("all_modes"),
        Some(&RawValue::List(vec![
            RawValue::Text("walk".into()),
            RawValue::Text("pt".into())
        ]))
    );
    // json null folds into absence
    assert!(row.get("line_id").is_none());
}

#[test]
fn json_top_level_object_is_rejected() {
    let error = raw_table_from_json(r#"{"trips": []}"#).expect_err("must fail");
    assert!(matches!(error, IngestError::NotAnArray { .. }));
}

#[test]
fn json_file_round_trips() {
    let file = write_temp(r#"[{"trip_id": "t1"}, {"trip_id": "t2"}]"#);
    let table = read_json_table(file.path()).expect("read");
    assert_eq!(table.len(), 2);
}
