// Tests for `docugen instrument`

use std::fs;

use crate::common::{create_project, run_docugen, stderr_of, stdout_of};

const BARE: &str = "def ping():\n    pass\n";
const INSTRUMENTED: &str = "\"\"\"Bare module.\"\"\"\ndef ping():\n    \"\"\"Ping.\"\"\"\n    pass\n";

#[test]
fn test_instrument_single_file_prints_text() {
    let dir = create_project(&[("bare.py", BARE)]);
    let output = run_docugen(dir.path(), &["instrument", "bare.py"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), INSTRUMENTED);
    assert!(stderr_of(&output).contains("bare.py: 2 docstring(s) written\n"));

    // the file itself is untouched
    assert_eq!(fs::read_to_string(dir.path().join("bare.py")).unwrap(), BARE);
}

#[test]
fn test_instrument_write_is_idempotent() {
    let dir = create_project(&[("pkg/bare.py", BARE), ("pkg/other.py", BARE)]);
    let output = run_docugen(dir.path(), &["instrument", "--write"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("2 file(s), 0 failed, 4 docstring(s) written\n"));
    assert_eq!(
        fs::read_to_string(dir.path().join("pkg/bare.py")).unwrap(),
        INSTRUMENTED
    );

    let output = run_docugen(dir.path(), &["instrument", "--write"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("2 file(s), 0 failed, 0 docstring(s) written\n"));

    let output = run_docugen(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout_of(&output));
}

#[test]
fn test_instrument_style_flag() {
    let source = "def add(a, b):\n    return a + b\n";
    let dir = create_project(&[("math_ops.py", source)]);
    let output = run_docugen(dir.path(), &["instrument", "--style", "numpy", "math_ops.py"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("\"\"\"Math ops module.\"\"\"\n"));
    assert!(stdout.contains("    Parameters\n    ----------\n    a\n        The a argument.\n"));
}

#[test]
fn test_instrument_style_from_pyproject() {
    let pyproject = "[tool.docugen]\nstyle = \"rest\"\n";
    let source = "def add(a, b):\n    return a + b\n";
    let dir = create_project(&[("pyproject.toml", pyproject), ("ops.py", source)]);
    let output = run_docugen(dir.path(), &["instrument", "ops.py"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("    :param a: The a argument.\n"));
}

#[test]
fn test_instrument_replace_all_mode() {
    let source = "\"\"\"Doc.\"\"\"\ndef ping():\n    'old'\n";
    let dir = create_project(&[("svc.py", source)]);
    let output = run_docugen(dir.path(), &["instrument", "--mode", "replace-all", "svc.py"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_of(&output),
        "\"\"\"Svc module.\"\"\"\ndef ping():\n    \"\"\"Ping.\"\"\"\n"
    );
}

#[test]
fn test_instrument_without_write_reports_for_many_files() {
    let dir = create_project(&[("a.py", BARE), ("b.py", BARE)]);
    let output = run_docugen(dir.path(), &["instrument", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(value["summary"]["files"], 2);
    assert_eq!(value["summary"]["edits"], 4);
    assert_eq!(value["summary"]["coverage_after"], 100.0);
    assert_eq!(fs::read_to_string(dir.path().join("a.py")).unwrap(), BARE);
}

#[test]
fn test_instrument_syntax_error_exits_2() {
    let dir = create_project(&[("broken.py", "def f(:\n")]);
    let output = run_docugen(dir.path(), &["instrument", "broken.py"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("docugen instrument: broken.py: syntax error"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_instrument_rejects_unknown_style() {
    let dir = create_project(&[("a.py", BARE)]);
    let output = run_docugen(dir.path(), &["instrument", "--style", "javadoc", "a.py"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("javadoc"));
}
