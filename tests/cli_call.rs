mod common;

use std::io::Write;
use std::process::{Command, Stdio};

use common::run_cli;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn test_call_create_then_list() {
    let dir = tempdir().unwrap();

    let created = run_cli(
        dir.path(),
        &[
            "call",
            "create-domain",
            "--args",
            r#"{"name":"retail","label":"Retail","description":"Shops","icon":"cart","order":1,"tags":["pos"]}"#,
        ],
    );
    assert!(created.success, "stderr:\n{}", created.stderr);
    assert_eq!(created.json()["name"], "retail");

    let listed = run_cli(dir.path(), &["call", "list-domains"]);
    assert!(listed.success);
    assert_eq!(listed.json()[0]["label"], "Retail");
    assert!(dir.path().join("domains.json").is_file());
}

#[test]
fn test_call_failure_prints_payload_and_exits_non_zero() {
    let dir = tempdir().unwrap();

    let output = run_cli(
        dir.path(),
        &["call", "get-solution", "--args", r#"{"name":"ghost"}"#],
    );

    assert!(!output.success);
    let payload = output.json();
    assert_eq!(payload["error"], "NotFoundError");
    assert_eq!(payload["details"]["name"], "ghost");
}

#[test]
fn test_call_rejects_malformed_args() {
    let dir = tempdir().unwrap();
    let output = run_cli(dir.path(), &["call", "list-domains", "--args", "{oops"]);
    assert!(!output.success);
    assert_eq!(output.json()["error"], "InputError");
}

#[test]
fn test_tools_lists_every_operation() {
    let dir = tempdir().unwrap();
    let output = run_cli(dir.path(), &["tools", "--json"]);
    assert!(output.success);
    let tools = output.json();
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 15);
    assert!(names.contains(&"delete-entity"));
}

#[test]
fn test_serve_answers_line_per_request() {
    let dir = tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_rocket-catalog"))
        .arg("--data-root")
        .arg(dir.path())
        .arg("serve")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, r#"{{"id":1,"tool":"list-domains"}}"#).unwrap();
        writeln!(stdin, r#"{{"id":2,"tool":"nope"}}"#).unwrap();
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["result"], serde_json::json!([]));
    assert_eq!(lines[1]["id"], 2);
    assert_eq!(lines[1]["error"]["error"], "InputError");
}

#[test]
fn test_doctor_reports_broken_catalog() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("domains.json"), "{}").unwrap();

    let output = run_cli(dir.path(), &["doctor", "--json"]);

    assert!(!output.success);
    let report = output.json();
    assert_eq!(report["checks"][0]["check"], "domains");
    assert_eq!(report["checks"][0]["ok"], false);
    assert_eq!(report["checks"][0]["error"]["error"], "FormatError");
}

fn seed_crm(root: &std::path::Path) {
    std::fs::write(
        root.join("domains.json"),
        r#"[{"name":"crm","label":"CRM","description":"Customers","icon":"users","order":1,"tags":["sales"]}]"#,
    )
    .unwrap();
    std::fs::create_dir_all(root.join("crm/schemas")).unwrap();
}

#[test]
fn test_doctor_reports_nonconforming_schema_files() {
    let dir = tempdir().unwrap();
    seed_crm(dir.path());
    std::fs::write(
        dir.path().join("crm/schemas/Person.json"),
        r#"{"@type":"Schema","@context":"https://rocketschema.org/context","name":"Person","description":"A human",
            "properties":[{"name":"id","type":"string","mode":"stored","description":"Key"}]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("crm/schemas/Lead.json"),
        r#"{"@type":"Schema","name":"Lead","description":"A prospect",
            "properties":[{"name":"score","type":"number","mode":"guessed"}]}"#,
    )
    .unwrap();

    let output = run_cli(dir.path(), &["doctor", "--json"]);

    assert!(!output.success);
    let report = output.json();
    let schemas = &report["checks"][3];
    assert_eq!(schemas["check"], "schemas");
    assert_eq!(schemas["ok"], false);
    assert_eq!(schemas["count"], 2);
    let files = schemas["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["path"].as_str().unwrap().ends_with("Lead.json"));
    let errors: Vec<&str> = files[0]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        errors,
        vec![
            "@context must be \"https://rocketschema.org/context\"",
            "properties[0] (score): description is required",
            "properties[0] (score): mode must be one of: stored, enum, computed",
        ]
    );
    // The plain listing still loads both files.
    assert_eq!(report["checks"][2]["ok"], true);
}

#[test]
fn test_doctor_passes_with_stub_schema_warning() {
    let dir = tempdir().unwrap();
    seed_crm(dir.path());
    std::fs::write(
        dir.path().join("crm/schemas/Draft.json"),
        r#"{"@type":"Schema","@context":"https://rocketschema.org/context","name":"Draft","description":"Later","properties":[]}"#,
    )
    .unwrap();

    let output = run_cli(dir.path(), &["doctor", "--json"]);

    assert!(output.success, "stderr: {}", output.stderr);
    let report = output.json();
    let schemas = &report["checks"][3];
    assert_eq!(schemas["ok"], true);
    assert_eq!(schemas["files"][0]["warnings"].as_array().map(Vec::len), Some(1));
}
