// skemator-cli/tests/integration.rs
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_json(contents: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().expect("Failed to create temp file");
    temp.write_all(contents.as_bytes())
        .expect("Failed to write to temp file");
    temp
}

fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(&stdout).expect("CLI should emit valid JSON")
}

#[test]
fn test_valid_json() {
    let temp = temp_json(r#"{"name": "Alice", "age": 30}"#);

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"object\""))
        .stdout(predicate::str::contains("\"properties\""))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_reads_stdin() {
    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    let assert = cmd.write_stdin(r#"[1, 2, 3]"#).assert().success();

    let schema = stdout_json(assert.get_output());
    assert_eq!(schema["type"], "array");
    assert!(schema.get("properties").is_none());
}

#[test]
fn test_expand_scalar_lists() {
    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    let assert = cmd
        .arg("--expand-scalar-lists")
        .write_stdin(r#"[1, 2, 3]"#)
        .assert()
        .success();

    let schema = stdout_json(assert.get_output());
    let items = schema["properties"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for (item, n) in items.iter().zip(1..) {
        assert_eq!(item["type"], "integer");
        assert_eq!(item["value"], n);
    }
}

#[test]
fn test_prior_schema() {
    let input = temp_json(r#"{"a": 1, "b": "two"}"#);
    let prior = temp_json(
        r#"{"description": "top", "properties": {"a": {"description": "field a", "required": false}, "gone": {}}}"#,
    );

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    let assert = cmd
        .arg("--schema")
        .arg(prior.path())
        .arg(input.path())
        .assert()
        .success();

    let schema = stdout_json(assert.get_output());
    assert_eq!(schema["description"], "top");
    assert_eq!(schema["properties"]["a"]["description"], "field a");
    assert_eq!(schema["properties"]["a"]["required"], false);
    assert_eq!(schema["properties"]["b"]["description"], "<none>");
    assert!(schema["properties"].get("gone").is_none());
}

#[test]
fn test_output_as_prior_keeps_shape() {
    let data = r#"{"items": [{"id": 1}, {"id": 2.5}], "tags": ["x", "y"]}"#;
    let input = temp_json(data);

    let mut first = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    let first_out = first.arg(input.path()).assert().success();
    let first_schema = stdout_json(first_out.get_output());
    let prior = temp_json(&first_schema.to_string());

    let mut second = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    let second_out = second
        .args(["-s", prior.path().to_str().unwrap()])
        .arg(input.path())
        .assert()
        .success();

    assert_eq!(stdout_json(second_out.get_output()), first_schema);
}

#[test]
fn test_invalid_json() {
    let temp = temp_json(r#"{"hello":"world}"#);

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: Could not decode input file"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_invalid_stdin_named() {
    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.write_stdin("{");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Could not decode input file <stdin>"));
}

#[test]
fn test_malformed_json_variants() {
    let test_cases = vec![
        (r#"{"invalid": json}"#, "unquoted value"),
        (r#"{"incomplete":"#, "incomplete string"),
        (r#"{"trailing":,"#, "trailing comma"),
        (r#"{invalid: "json"}"#, "unquoted key"),
        (r#"{"nested": {"broken": json}}"#, "nested broken JSON"),
    ];

    for (invalid_json, description) in test_cases {
        println!("Testing: {}", description);
        let temp = temp_json(invalid_json);

        let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
        cmd.arg(temp.path());
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Could not decode input file"))
            .stderr(predicate::str::contains("panicked").not());
    }
}

#[test]
fn test_invalid_schema_file() {
    let input = temp_json(r#"{"a": 1}"#);
    let prior = temp_json(r#"{"description": "#);

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg("--schema").arg(prior.path()).arg(input.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Could not decode schema file"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg(&missing);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("error: Cannot open input file"))
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_missing_schema_file() {
    let input = temp_json(r#"{"a": 1}"#);
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg("-s").arg(dir.path().join("prior.json")).arg(input.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("error: Cannot open schema file"));
}

#[test]
fn test_max_depth() {
    let input = temp_json(r#"{"a": {"b": [{"c": 1}]}}"#);

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.args(["--max-depth", "3"]).arg(input.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Input nesting depth 4 exceeds the maximum of 3",
        ));

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.args(["--max-depth", "4"]).arg(input.path());
    cmd.assert().success();
}

#[test]
fn test_max_depth_above_parser_limit() {
    let depth = 150;
    let input = temp_json(&format!("{}1{}", "[".repeat(depth), "]".repeat(depth)));

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    let assert = cmd.args(["--max-depth", "200"]).arg(input.path()).assert().success();

    // The schema nests deeper than serde_json parses by default, so inspect the text
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches(r#""type": "array""#).count(), depth);
    // the innermost `[1]` is all-scalar and left unexpanded
    assert_eq!(stdout.matches(r#""properties": ["#).count(), depth - 1);

    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.args(["--max-depth", "149"]).arg(input.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Input nesting depth 150 exceeds the maximum of 149",
        ));
}

#[test]
fn test_big_integer_stays_integer() {
    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg("--compact").write_stdin(r#"{"n": 18446744073709551616}"#);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#""type":"integer","pattern":"","value":18446744073709551616"#,
        ));
}

#[test]
fn test_debug_output_on_stderr() {
    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg("--debug").write_stdin(r#"{"xs": [1, 2]}"#);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipping per-element schema"))
        .stderr(predicate::str::contains("Skematized <stdin> into 2 node(s)"));
}

#[test]
fn test_bad_flag_is_usage_error() {
    let mut cmd = assert_cmd::Command::cargo_bin("skemator-cli").unwrap();
    cmd.arg("--max-depth").arg("deep");
    cmd.assert().failure().code(2);
}
