//! Integration tests for the fdbvp binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fdbvp() -> Command {
    let mut cmd = Command::cargo_bin("fdbvp").unwrap();
    cmd.env_remove("FDBVP_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn json_output(args: &[&str]) -> Value {
    let output = fdbvp().args(args).args(["--format", "json"]).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// SOLVE
// =============================================================================

#[test]
fn test_solve_default_preset_json() {
    let report = json_output(&["solve"]);

    assert_eq!(report["method"], "thomas");
    assert_eq!(report["n"], 8);

    let nodes = report["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 9);
    assert_eq!(nodes[0]["x"].as_f64(), Some(1.0));
    assert_eq!(nodes[0]["y"].as_f64(), Some(0.0));
    assert_eq!(nodes[8]["x"].as_f64(), Some(2.0));
    assert_eq!(nodes[8]["y"].as_f64(), Some(2.0));

    let y4 = nodes[4]["y"].as_f64().unwrap();
    assert!((y4 - 0.256_158_071_815_130_3).abs() < 1e-6);

    assert_eq!(report["fit"]["degree"], 5);
    assert_eq!(report["fit"]["coefficients"].as_array().unwrap().len(), 6);
}

#[test]
fn test_solve_minimal_prints_values() {
    let output = fdbvp()
        .args(["solve", "--method", "dense", "--format", "minimal"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "0");
    assert_eq!(lines[8], "2");
}

#[test]
fn test_solve_harmonic_tracks_exact_solution() {
    let report = json_output(&["solve", "--preset", "harmonic", "-n", "32", "--no-fit"]);

    assert!(report["fit"].is_null());
    for node in report["nodes"].as_array().unwrap() {
        let error = node["error"].as_f64().unwrap();
        assert!(error < 1e-3, "error = {error}");
    }
}

#[test]
fn test_solve_custom_coefficients_match_preset() {
    let custom = json_output(&[
        "solve", "--p", "0,-1", "--q", "0,0,1", "--f", "1,2", "--x0", "1", "--xk", "2", "--y0", "0",
        "--yk", "2", "--no-fit",
    ]);
    let preset = json_output(&["solve", "--no-fit"]);
    assert_eq!(custom["nodes"], preset["nodes"]);
}

#[test]
fn test_solve_table_output() {
    fdbvp()
        .args(["solve", "--preset", "linear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution"))
        .stdout(predicate::str::contains("Polynomial Fit"))
        .stdout(predicate::str::contains("P(x) ="));
}

#[test]
fn test_solve_csv_header() {
    fdbvp()
        .args(["solve", "--preset", "linear", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("index,x,y,exact,error"));
}

// =============================================================================
// COMPARE AND FIT
// =============================================================================

#[test]
fn test_compare_methods_agree() {
    let report = json_output(&["compare", "-n", "64"]);
    assert_eq!(report["agree"], true);
    assert!(report["max_abs_diff"].as_f64().unwrap() < 1e-10);
    assert_eq!(report["nodes"].as_array().unwrap().len(), 65);
}

#[test]
fn test_fit_samples_csv() {
    let output = fdbvp()
        .args(["fit", "--degree", "2", "--samples", "5", "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "x,value");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_fit_minimal_trimmed() {
    fdbvp()
        .args(["fit", "--preset", "linear", "--degree", "1", "--trim", "--format", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("P(x) = "));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_show_defaults() {
    fdbvp()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("method = \"thomas\""))
        .stdout(predicate::str::contains("max_fit_degree = 5"));
}

#[test]
fn test_config_list_minimal_omits_header() {
    let output = fdbvp()
        .args(["config", "list", "--format", "minimal"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("method,thomas,"), "line = {}", lines[0]);

    fdbvp()
        .args(["config", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("key,default,description"));
}

#[test]
fn test_config_file_sets_method() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "method = \"matrix\"\nmax_fit_degree = 3").unwrap();
    let path = file.path().to_str().unwrap();

    fdbvp()
        .args(["--config", path, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("method = \"dense\""));

    let report = json_output(&["--config", path, "solve"]);
    assert_eq!(report["method"], "dense");
    assert_eq!(report["fit"]["degree"], 3);
}

#[test]
fn test_config_check_rejects_invalid_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "pivot_tolerance = 0.0").unwrap();

    fdbvp()
        .args(["config", "check"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("pivot_tolerance"));
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_zero_intervals_rejected() {
    fdbvp()
        .args(["solve", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid grid"));
}

#[test]
fn test_singular_system_reported() {
    // h = 1 and q = 2 zero the only pivot
    fdbvp()
        .args(["solve", "--p", "0", "--q", "2", "--f", "0", "--x0", "0", "--xk", "2", "-n", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Singular system"));
}

#[test]
fn test_bad_coefficients_rejected() {
    fdbvp()
        .args(["solve", "--p", "0,x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coefficient list"));
}
