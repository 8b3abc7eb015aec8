use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

const DEFINITION: &str = r#"{
    "schema": {
        "User": {
            "primary_key": "id",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "email", "type": "string"},
                {"name": "role_id", "type": "integer"},
                {"name": "active", "type": "integer", "default": 1},
                {"name": "created_at", "type": "datetime"}
            ],
            "associations": [{"name": "role", "foreign_key": "role_id", "target": "Role"}]
        },
        "Role": {
            "primary_key": "id",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "name", "type": "string"},
                {"name": "code", "type": "string"}
            ]
        }
    },
    "attributes": {
        "User": {
            "declare": [
                {"name": "active", "type": "boolean"},
                {"name": "email", "read_only": true},
                {"name": "full_name", "virtual": true},
                {"name": "created_at", "included": false}
            ]
        }
    }
}"#;

fn write_definition(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("models.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn attrgrid() -> Command {
    Command::cargo_bin("attrgrid").unwrap()
}

#[test]
fn test_models_lists_schema_models() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);

    attrgrid()
        .arg("models")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("User"))
        .stdout(predicate::str::contains("Role"));
}

#[test]
fn test_resolve_json_natural_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);

    let output = attrgrid()
        .arg("resolve")
        .arg(&file)
        .arg("User")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = json["User"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["id", "email", "role__name", "active", "created_at", "full_name"]
    );

    let user = &json["User"];
    assert_eq!(user[1]["read_only"], true);
    assert_eq!(user[1]["type"], "string");
    assert_eq!(user[3]["type"], "boolean");
    assert_eq!(user[3]["default_value"], 1);
    assert_eq!(user[4]["included"], false);
    assert_eq!(user[5]["virtual"], true);
}

#[test]
fn test_resolve_table_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);

    attrgrid()
        .arg("resolve")
        .arg(&file)
        .arg("User")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("role__name"))
        .stdout(predicate::str::contains("read_only"))
        .stdout(predicate::str::contains("hidden"));
}

#[test]
fn test_resolve_honors_config_display_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);
    let config_dir = temp_dir.path().join("conf");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"display_fields": ["code"]}"#,
    )
    .unwrap();

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("resolve")
        .arg(&file)
        .arg("User")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("role__code"))
        .stdout(predicate::str::contains("role__name").not());
}

#[test]
fn test_resolve_unknown_exposed_attribute_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let definition = DEFINITION.replace(
        r#""declare": ["#,
        r#""expose": ["email", "bogus"], "declare": ["#,
    );
    let file = write_definition(temp_dir.path(), &definition);

    attrgrid()
        .arg("resolve")
        .arg(&file)
        .arg("User")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown attribute 'bogus' for model User",
        ));
}

#[test]
fn test_resolve_unknown_model_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);

    attrgrid()
        .arg("resolve")
        .arg(&file)
        .arg("Ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model: Ghost"));
}

#[test]
fn test_serialize_rows_and_keyed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);
    let records = temp_dir.path().join("records.json");
    std::fs::write(
        &records,
        r#"[{
            "id": 1,
            "email": "ada@example.com",
            "role__name": "admin",
            "active": true,
            "created_at": "2024-01-01",
            "full_name": "Ada Lovelace"
        }]"#,
    )
    .unwrap();

    let output = attrgrid()
        .arg("serialize")
        .arg(&file)
        .arg("User")
        .arg(&records)
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([[1, "ada@example.com", "admin", true, "Ada Lovelace"]])
    );

    let output = attrgrid()
        .arg("serialize")
        .arg(&file)
        .arg("User")
        .arg(&records)
        .arg("--keyed")
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["role__name"], "admin");
    assert!(rows[0].get("created_at").is_none());
}

#[test]
fn test_serialize_missing_member_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);
    let records = temp_dir.path().join("records.json");
    std::fs::write(&records, r#"[{"id": 1}]"#).unwrap();

    attrgrid()
        .arg("serialize")
        .arg(&file)
        .arg("User")
        .arg(&records)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record has no member 'email'"));
}

#[test]
fn test_config_set_then_used_by_resolve() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);
    let config_dir = temp_dir.path().join("conf");

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("config")
        .arg("display-fields")
        .arg("code,name")
        .assert()
        .success()
        .stdout(predicate::str::contains("display-fields set to code,name"));

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("config")
        .arg("display-fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("code,name"));

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("datetime-format"));

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("resolve")
        .arg(&file)
        .arg("User")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("role__code"));
}

#[test]
fn test_config_rejects_bad_datetime_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_dir = temp_dir.path().join("conf");

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("config")
        .arg("datetime-format")
        .arg("%Q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid datetime format '%Q'"));
    assert!(!config_dir.join("config.json").exists());
}

#[test]
fn test_config_without_directory_fails() {
    attrgrid()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no config directory given"));
}

#[test]
fn test_serialize_with_bad_datetime_format_reports_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = write_definition(temp_dir.path(), DEFINITION);
    let config_dir = temp_dir.path().join("conf");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"datetime_format": "%Q"}"#,
    )
    .unwrap();
    let records = temp_dir.path().join("records.json");
    std::fs::write(&records, "[]").unwrap();

    attrgrid()
        .arg("--config")
        .arg(&config_dir)
        .arg("serialize")
        .arg(&file)
        .arg("User")
        .arg(&records)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Config error: invalid datetime format"));
}

#[test]
fn test_serialize_nested_object_member() {
    let temp_dir = tempfile::tempdir().unwrap();
    let definition = DEFINITION.replace(
        r#"{"name": "created_at", "type": "datetime"}"#,
        r#"{"name": "created_at", "type": "datetime"},
                {"name": "settings", "type": "jsonb", "default": {"theme": "light"}}"#,
    );
    let file = write_definition(temp_dir.path(), &definition);
    let records = temp_dir.path().join("records.json");
    std::fs::write(
        &records,
        r#"[{
            "id": 1,
            "email": "ada@example.com",
            "role__name": "admin",
            "active": true,
            "created_at": "2024-01-01",
            "settings": {"theme": "dark", "columns": [1, 2]},
            "full_name": "Ada Lovelace"
        }]"#,
    )
    .unwrap();

    let output = attrgrid()
        .arg("serialize")
        .arg(&file)
        .arg("User")
        .arg(&records)
        .arg("--keyed")
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows[0]["settings"],
        serde_json::json!({"theme": "dark", "columns": [1, 2]})
    );
}
