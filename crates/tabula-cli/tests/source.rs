//! Integration tests for record snapshot loading.

use std::fs;

use tabula_cli::source::load_records;
use tabula_engine::{ListScreen, ScreenConfig};
use tabula_model::{ColumnFilter, RecordId, Value};

const SCREEN: &str = r#"
name = "leads"
identifier = "lead_id"
page_size = 2
export_scope = "filtered"

[[columns]]
id = "name"
label = "Lead"

[[columns]]
id = "stage"
label = "Stage"
"#;

#[test]
fn csv_snapshot_feeds_a_screen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("leads.csv");
    fs::write(
        &path,
        "lead_id,name,stage,value\n\
         L-1,Umbrella,Won,1200\n\
         L-2,Hooli,Open,300.5\n\
         L-3,\"Stark, Inc\",Open,\n",
    )
    .expect("write csv");

    let records = load_records(&path).expect("load csv");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("value"), Some(&Value::Int(1200)));
    assert_eq!(records[2].get("value"), Some(&Value::Null));

    let config = ScreenConfig::from_toml_str(SCREEN).expect("config");
    let mut screen = ListScreen::new(config, records).expect("mount");
    screen.set_column_filter(Some(ColumnFilter::new("stage", "Open")));
    let view = screen.view();
    assert_eq!(
        view.visible_ids(),
        vec![
            RecordId::new("L-2").expect("id"),
            RecordId::new("L-3").expect("id")
        ]
    );
}

#[test]
fn json_snapshot_with_numeric_identifiers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("leads.json");
    fs::write(
        &path,
        r#"[
            {"lead_id": 10, "name": "Umbrella", "stage": "Won"},
            {"lead_id": 11, "name": "Hooli", "stage": "Open", "tags": ["hot", "q3"]}
        ]"#,
    )
    .expect("write json");

    let records = load_records(&path).expect("load json");
    let config = ScreenConfig::from_toml_str(SCREEN).expect("config");
    let mut screen = ListScreen::new(config, records).expect("mount");
    screen.set_search("Q3");
    assert_eq!(screen.view().visible_ids(), vec![RecordId::from(11)]);
}

#[test]
fn json_without_identifier_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("leads.json");
    fs::write(&path, r#"[{"lead_id": 1}, {"name": "orphan"}]"#).expect("write json");

    let records = load_records(&path).expect("load json");
    let config = ScreenConfig::from_toml_str(SCREEN).expect("config");
    let err = ListScreen::new(config, records).expect_err("missing identifier");
    assert_eq!(
        err.to_string(),
        "record 1 has no usable 'lead_id' identifier"
    );
}

#[test]
fn malformed_json_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json").expect("write json");

    let err = load_records(&path).expect_err("malformed");
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(load_records(&dir.path().join("absent.csv")).is_err());
}
