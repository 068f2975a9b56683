//! CLI contract tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;

fn reportql(config: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("reportql").expect("binary should build");
    cmd.env_remove("REPORTQL_MATCH_MODE")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

#[test]
fn parse_prints_report_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "");

    let output = reportql(&config)
        .args(["parse", "volume exceeding ₦1B", "--compact"])
        .output()
        .expect("run reportql");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["reportType"], "generic");
    assert_eq!(json["reportName"], "Custom Report");
    assert_eq!(json["filters"][0]["field"], "amount_ngn");
    assert_eq!(json["filters"][0]["operator"], "greaterThan");
    assert_eq!(json["filters"][0]["value"].as_f64(), Some(1_000_000_000.0));
}

#[test]
fn parse_honours_fixed_now() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "");

    let output = reportql(&config)
        .args(["parse", "trades yesterday", "--now", "2026-10-19T12:00:00Z"])
        .output()
        .expect("run reportql");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["dateRange"]["start"], "2026-10-18T00:00:00Z");
    assert_eq!(json["dateRange"]["end"], "2026-10-18T23:59:59Z");
}

#[test]
fn parse_save_as_wraps_envelope() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "[output]\npretty = false\n");

    let output = reportql(&config)
        .args([
            "parse",
            "pnl by desk",
            "--save-as",
            "Desk P&L",
            "--tag",
            "pnl",
            "--tag",
            "desk",
        ])
        .output()
        .expect("run reportql");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["name"], "Desk P&L");
    assert_eq!(json["query"], "pnl by desk");
    assert_eq!(json["tags"], serde_json::json!(["pnl", "desk"]));
    assert_eq!(json["config"]["reportType"], "pnl");
    assert_eq!(json["config"]["groupBy"], serde_json::json!(["desk"]));
}

#[test]
fn summary_prints_one_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "");

    reportql(&config)
        .args(["summary", "high risk clients", "--now", "2026-10-19T12:00:00Z"])
        .assert()
        .success()
        .stdout("Counterparties | risk_category equals High | all time\n");
}

#[test]
fn invalid_now_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "");

    reportql(&config)
        .args(["parse", "today", "--now", "yesterday"])
        .assert()
        .failure();
}

#[test]
fn check_config_accepts_valid_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "[lexicon]\ncounterparties = [\"providus bank\"]\n");

    let output = reportql(&config)
        .arg("check-config")
        .output()
        .expect("run reportql");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Configuration is valid"));
    assert!(stdout.contains("18 counterparties"));
}

#[test]
fn check_config_rejects_bad_lexicon() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "[lexicon]\ncounterparties = [\"  \"]\n");

    reportql(&config).arg("check-config").assert().failure();
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let absent = dir.path().join("absent.toml");

    reportql(&absent).args(["parse", "trades"]).assert().failure();
}

#[test]
fn lexicon_command_lists_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(&dir, "");

    let output = reportql(&config)
        .arg("lexicon")
        .output()
        .expect("run reportql");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert!(json["counterparties"]
        .as_array()
        .is_some_and(|cps| cps.iter().any(|c| c == "firstbank")));
    assert!(json["products"].as_array().is_some_and(|p| !p.is_empty()));
}
