// Tests for `docugen validate` thresholds and exit codes

use std::fs;

use crate::common::{create_project, run_docugen, stderr_of, stdout_of};

const GOOD: &str = "\"\"\"Helpers.\"\"\"\n\n\ndef ping():\n    \"\"\"Ping the server.\"\"\"\n";
const BARE: &str = "def ping():\n    pass\n";

#[test]
/// Exit code 0 when every file meets the default thresholds.
fn test_validate_passes() {
    let dir = create_project(&[("good.py", GOOD)]);
    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("Style: google  Coverage threshold: 90%  Compliance threshold: 85%\n"));
    assert!(stdout.contains("PASS  good.py  coverage 100.00%  compliance 100.00%\n"));
    assert!(stdout.ends_with("SUMMARY: 1/1 files passed\n"));
}

#[test]
/// Exit code 1 when any file falls short.
fn test_validate_fails_below_threshold() {
    let dir = create_project(&[("good.py", GOOD), ("bare.py", BARE)]);
    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("FAIL  bare.py  coverage 0.00%  compliance 0.00%\n"));
}

#[test]
fn test_validate_flag_thresholds() {
    let dir = create_project(&[("bare.py", BARE)]);
    let output = run_docugen(
        dir.path(),
        &["validate", "--min-coverage", "0", "--min-compliance", "0"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output)
        .starts_with("Style: google  Coverage threshold: 0%  Compliance threshold: 0%\n"));
}

#[test]
fn test_validate_reads_pyproject_thresholds() {
    let pyproject = "[tool.docugen]\nmin_coverage = 0.0\nmin_compliance = 0.0\n";
    let dir = create_project(&[("pyproject.toml", pyproject), ("bare.py", BARE)]);
    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout_of(&output));

    // flags win over the config file
    let output = run_docugen(dir.path(), &["validate", "--min-coverage", "50"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
/// The report echoes the docstring style read from pyproject.toml.
fn test_validate_echoes_configured_style() {
    let pyproject = "[tool.docugen]\nstyle = \"numpy\"\n";
    let dir = create_project(&[("pyproject.toml", pyproject), ("good.py", GOOD)]);
    let output = run_docugen(dir.path(), &["validate", "--output", "report.json"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("Style: numpy  "));

    let written = fs::read_to_string(dir.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["config"]["style"], "numpy");
}

#[test]
fn test_validate_malformed_pyproject_falls_back_to_defaults() {
    let dir = create_project(&[("pyproject.toml", "[tool.docugen\n"), ("good.py", GOOD)]);
    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr_of(&output).contains("using default config"));
}

#[test]
fn test_validate_writes_json_report() {
    let dir = create_project(&[("good.py", GOOD), ("bare.py", BARE)]);
    let output = run_docugen(dir.path(), &["validate", "--output", "report.json"]);
    assert_eq!(output.status.code(), Some(1));

    let written = fs::read_to_string(dir.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["config"]["style"], "google");
    assert_eq!(value["config"]["min_coverage"], 90.0);
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["summary"]["passed"], 1);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["files"][0]["filepath"], "bare.py");
    assert_eq!(value["files"][0]["passed"], false);
}

#[test]
fn test_validate_json_stdout() {
    let dir = create_project(&[("good.py", GOOD)]);
    let output = run_docugen(dir.path(), &["validate", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(value["files"][0]["coverage"], 100.0);
}

#[test]
/// Exit code 1 when nothing was checked.
fn test_validate_without_files_fails() {
    let dir = create_project(&[("README.md", "# docs\n")]);
    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("no python files found"));
}

#[test]
/// Exit code 2 when a file cannot be analyzed.
fn test_validate_syntax_error_exits_2() {
    let dir = create_project(&[("good.py", GOOD), ("broken.py", "class :\n")]);
    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).contains("ERROR broken.py: syntax error"));
}
