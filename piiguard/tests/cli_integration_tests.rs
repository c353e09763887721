// piiguard/tests/cli_integration_tests.rs
//! Command-line integration tests for the `piiguard` binary.
//!
//! Each test writes an input CSV into a fresh temporary directory, runs the
//! binary there, and inspects the output CSV and console streams. The
//! `PIIGUARD_*` environment variables are cleared so the host environment
//! cannot change defaults.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

// Strips ANSI escape codes in case the terminal-detection logic ever colors output.
fn strip_ansi(s: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(s)).to_string()
}

fn piiguard_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("piiguard"));
    cmd.current_dir(dir);
    for var in [
        "PIIGUARD_INPUT",
        "PIIGUARD_OUTPUT",
        "PIIGUARD_ID_COLUMN",
        "PIIGUARD_PAYLOAD_COLUMN",
        "PIIGUARD_ALLOW_DEBUG_PII",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> Result<()> {
    fs::write(dir.path().join(name), content)?;
    Ok(())
}

fn read_output(path: &Path) -> Result<Vec<(String, String, String)>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    assert_eq!(headers, vec!["record_id", "redacted_data_json", "is_pii"]);
    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push((row[0].to_string(), row[1].to_string(), row[2].to_string()));
    }
    Ok(rows)
}

const SAMPLE_INPUT: &str = r#"record_id,data_json
1,"{""phone"": ""9876543210"", ""order_value"": 1200}"
2,"{""name"": ""A"", ""email"": ""a@x.com""}"
3,"{""product"":""Widget"",  ""qty"": 3}"
4,"{""broken"": "
5,"{""address"": ""12 Main St"", ""city"": ""Metropolis""}"
"#;

#[test]
fn test_redacts_sample_file() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "data.csv", SAMPLE_INPUT)?;

    let assert = piiguard_cmd(dir.path())
        .args(["data.csv", "--output", "out.csv"])
        .assert()
        .success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert_eq!(stdout.trim(), "Processed 5 records. Output: out.csv");

    let rows = read_output(&dir.path().join("out.csv"))?;
    let ids: Vec<&str> = rows.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

    assert_eq!(rows[0].1, r#"{"phone": "98XXXXXX10", "order_value": "1200"}"#);
    assert_eq!(rows[0].2, "TRUE");
    assert_eq!(rows[1].1, r#"{"name": "A", "email": "a@x.com"}"#);
    assert_eq!(rows[1].2, "TRUE");
    assert_eq!(rows[2].1, r#"{"product":"Widget",  "qty": 3}"#);
    assert_eq!(rows[2].2, "FALSE");
    assert_eq!(rows[3].1, r#"{"broken": "#);
    assert_eq!(rows[3].2, "FALSE");
    assert_eq!(rows[4].2, "TRUE");

    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(
        stderr.contains("Warning: 1 record(s) had an unparseable payload and were passed through unchanged."),
        "stderr: {stderr}"
    );
    Ok(())
}

#[test]
fn test_quiet_suppresses_unparsed_warning() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "data.csv", SAMPLE_INPUT)?;

    let assert = piiguard_cmd(dir.path())
        .args(["data.csv", "--quiet"])
        .assert()
        .success();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(!stderr.contains("Warning:"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_default_input_and_output_names() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "record_id,data_json\n9,\"{\"\"upi\"\": \"\"ravi@ybl\"\"}\"\n")?;

    piiguard_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 records. Output: redacted_output.csv"));

    let rows = read_output(&dir.path().join("redacted_output.csv"))?;
    assert_eq!(rows, vec![("9".to_string(), r#"{"upi": "XXX@ybl"}"#.to_string(), "TRUE".to_string())]);
    Ok(())
}

#[test]
fn test_missing_input_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let assert = piiguard_cmd(dir.path())
        .arg("nope.csv")
        .assert()
        .failure()
        .code(1);
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("Error: File nope.csv not found"), "stderr: {stderr}");
    assert!(!dir.path().join("redacted_output.csv").exists());
    Ok(())
}

#[test]
fn test_missing_payload_column_is_a_schema_error() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "record_id,Data_json\n1,{}\n")?;

    let assert = piiguard_cmd(dir.path()).assert().failure().code(1);
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(
        stderr.contains("Input is missing required column 'data_json' (found: record_id, Data_json)"),
        "stderr: {stderr}"
    );
    assert!(!dir.path().join("redacted_output.csv").exists());
    Ok(())
}

#[test]
fn test_payload_column_can_be_renamed() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "record_id,Data_json\n1,\"{\"\"device_id\"\": \"\"d\"\", \"\"user_id\"\": \"\"u\"\"}\"\n")?;

    piiguard_cmd(dir.path())
        .args(["--payload-column", "Data_json"])
        .assert()
        .success();
    let rows = read_output(&dir.path().join("redacted_output.csv"))?;
    assert_eq!(rows[0].2, "TRUE");
    Ok(())
}

#[test]
fn test_payload_column_from_environment() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "id,payload\nA,\"{\"\"passport\"\": \"\"P1234567\"\"}\"\n")?;

    piiguard_cmd(dir.path())
        .env("PIIGUARD_ID_COLUMN", "id")
        .env("PIIGUARD_PAYLOAD_COLUMN", "payload")
        .assert()
        .success();
    let rows = read_output(&dir.path().join("redacted_output.csv"))?;
    assert_eq!(rows[0], ("A".to_string(), r#"{"passport": "PXXXXXX"}"#.to_string(), "TRUE".to_string()));
    Ok(())
}

#[test]
fn test_custom_config_overrides_vocabulary() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "record_id,data_json\n1,\"{\"\"nick\"\": \"\"A\"\", \"\"email\"\": \"\"a@x.com\"\"}\"\n")?;
    fs::write(
        dir.path().join("catalog.yaml"),
        "vocabulary:\n  identity_name: [name, nick]\n",
    )?;

    piiguard_cmd(dir.path())
        .args(["--config", "catalog.yaml"])
        .assert()
        .success();
    let rows = read_output(&dir.path().join("redacted_output.csv"))?;
    assert_eq!(rows[0].2, "TRUE");
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "record_id,data_json\n")?;
    fs::write(
        dir.path().join("catalog.yaml"),
        "patterns:\n  - name: bad\n    kind: phone\n    pattern: '(('\n",
    )?;

    piiguard_cmd(dir.path())
        .args(["--config", "catalog.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load catalog configuration catalog.yaml"));
    Ok(())
}

#[test]
fn test_summary_table_goes_to_stderr() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "data.csv", SAMPLE_INPUT)?;

    let assert = piiguard_cmd(dir.path())
        .args(["data.csv", "--summary"])
        .assert()
        .success();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("Records processed"), "stderr: {stderr}");
    assert!(stderr.contains("Rule multiple_address_components"), "stderr: {stderr}");
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(!stdout.contains("Records processed"));
    Ok(())
}

#[test]
fn test_empty_input_produces_header_only() -> Result<()> {
    let dir = tempdir()?;
    write_input(&dir, "input.csv", "record_id,data_json\n")?;

    piiguard_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 0 records."));
    assert!(read_output(&dir.path().join("redacted_output.csv"))?.is_empty());
    Ok(())
}
