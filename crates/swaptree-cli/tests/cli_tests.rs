//! End-to-end tests of the swaptree binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SWAPTION: &str = r#"
reference_date = "2025-01-15"
day_count = "Act365Fixed"

[model]
mean_reversion = 0.05
volatility = 0.01

[curve]
type = "flat"
rate = 0.04

[swap]
swap_type = "receiver"
nominal = 100.0
fixed_rate = 0.04
start = "2026-01-15"
maturity = "2029-01-15"

[engine]
time_steps = 30
"#;

fn swaptree() -> Command {
    Command::cargo_bin("swaptree").unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_price_table() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "swaption.toml", SWAPTION);

    swaptree()
        .arg("price")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("NPV"))
        .stdout(predicate::str::contains("ExerciseProbabilityAndSwapBoundary"))
        .stdout(predicate::str::contains("2028-01-15"));
}

#[test]
fn test_price_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "swaption.toml", SWAPTION);

    let output = swaptree()
        .args(["price", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["npv"].as_f64().unwrap() > 0.0);
    assert_eq!(json["exercises"].as_array().unwrap().len(), 3);
    let map = json["additional_results"]["ExerciseProbabilityAndSwapBoundary"]
        .as_object()
        .unwrap();
    assert!(map.contains_key("2026-01-15"));
}

#[test]
fn test_price_csv_and_minimal() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "swaption.toml", SWAPTION);

    swaptree()
        .args(["price", "--format", "csv", "--underlying", "single-swap"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("date,time,exercised,boundary_node"));

    swaptree()
        .args(["price", "-f", "minimal", "--steps", "20"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^-?\d+\.\d{6}\n$").unwrap());
}

#[test]
fn test_init_then_price() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.json");

    swaptree()
        .args(["init", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote sample swaption"));

    swaptree()
        .args(["init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    swaptree()
        .args(["price", "--format", "minimal", "--steps", "30"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_check_reports_invalid_file() {
    let dir = TempDir::new().unwrap();
    let invalid = SWAPTION.replace("volatility = 0.01", "volatility = -0.01");
    let path = write_file(&dir, "bad.toml", &invalid);

    swaptree()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("model.volatility"));
}

#[test]
fn test_check_schedule() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "swaption.toml", SWAPTION);

    swaptree()
        .args(["check", "--format", "json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fixed_coupons_left\": 3"));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "swaption.yaml", SWAPTION);

    swaptree()
        .arg("price")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
