use friendgrid::input::NodeInput;
use friendgrid::input::loader;
use friendgrid::fusion::{ItemParameters, Operation, Resource};
use serde_json::json;
use std::fs;

#[test]
fn test_load_simple_yaml_input() {
    let yaml_content = r#"
resource: "Record"
operation: "Create Record"
items:
  - DatasheetID: "dst123"
    records_body: '{"records":[{"fields":{"a":1}}]}'
  - datasheetId: "dst456"
    records_body:
      records:
        - fields:
            a: 2
"#;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("create_record.yaml");
    fs::write(&file_path, yaml_content).expect("Failed to write temp file");

    let loaded = loader::load_input_from_yaml(&file_path.to_string_lossy())
        .expect("Failed to load input from YAML");

    let expected = NodeInput::new(Resource::Record, Operation::CreateRecord)
        .item(ItemParameters::new()
            .datasheet_id("dst123")
            .records_body(r#"{"records":[{"fields":{"a":1}}]}"#))
        .item(ItemParameters::new()
            .datasheet_id("dst456")
            .records_body(json!({"records": [{"fields": {"a": 2}}]})));

    assert_eq!(loaded, expected);
    assert_eq!(loaded.credential, "friendGridApi");

    // Cleanup
    temp_dir.close().expect("Failed to close temp dir");
}

#[test]
fn test_load_json_input_with_legacy_operation_name() {
    let json_content = r#"{
        "resource": "Field",
        "operation": "Delete Fields",
        "credential": "workspaceB",
        "items": [{"spaceId": "spc1", "DatasheetID": "dst1", "fieldId": "fld1"}]
    }"#;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("delete_field.json");
    fs::write(&file_path, json_content).expect("Failed to write temp file");

    let loaded = loader::load_input_from_yaml(&file_path.to_string_lossy())
        .expect("Failed to load input from JSON");

    assert_eq!(loaded.operation, Operation::DeleteField);
    assert_eq!(loaded.credential, "workspaceB");
    assert_eq!(loaded.items[0].field_id.as_deref(), Some("fld1"));
}

#[test]
fn test_empty_items_run_once() {
    let input: NodeInput = serde_yaml::from_str("resource: Space\noperation: List space\n").unwrap();
    assert!(input.items.is_empty());
    assert_eq!(input.batch(), vec![ItemParameters::default()]);
}

#[test]
fn test_unknown_operation_fails_to_load() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("bad.yaml");
    fs::write(&file_path, "resource: Record\noperation: Truncate\n").expect("Failed to write temp file");

    let err = loader::load_input_from_yaml(&file_path.to_string_lossy()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown operation"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = loader::load_input_from_yaml("/nonexistent/input.yaml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/input.yaml"));
}
