// Tests for `docugen analyze`

use crate::common::{create_project, run_docugen, stderr_of, stdout_of};

const GOOD: &str = "\"\"\"Helpers.\"\"\"\n\n\ndef ping():\n    \"\"\"Ping the server.\"\"\"\n";
const BARE: &str = "def ping():\n    pass\n";

#[test]
fn test_analyze_walks_current_directory() {
    let dir = create_project(&[("pkg/good.py", GOOD), ("pkg/bare.py", BARE)]);
    let output = run_docugen(dir.path(), &["analyze"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("pkg/good.py (good)\n"), "{stdout}");
    assert!(stdout.contains("pkg/bare.py (bare)\n"), "{stdout}");
    assert!(stdout.contains("  coverage:   100.00% (2/2 documented)\n"));
    assert!(stdout.contains("  coverage:   0.00% (0/2 documented)\n"));
    assert!(stdout.contains("  missing:    bare, ping\n"));
    // sorted walk order
    assert!(stdout.find("pkg/bare.py").unwrap() < stdout.find("pkg/good.py").unwrap());
}

#[test]
fn test_analyze_skips_excluded_directories() {
    let dir = create_project(&[("app.py", GOOD), ("tests/test_app.py", BARE)]);
    let stdout = stdout_of(&run_docugen(dir.path(), &["analyze"]));
    assert!(stdout.contains("app.py (app)"));
    assert!(!stdout.contains("test_app.py"));
}

#[test]
fn test_analyze_json() {
    let dir = create_project(&[("bare.py", BARE)]);
    let output = run_docugen(dir.path(), &["analyze", "--json", "bare.py"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let report = &value["reports"][0];
    assert_eq!(report["path"], "bare.py");
    assert_eq!(report["module"], "bare");
    assert_eq!(report["total_entities"], 2);
    assert_eq!(report["coverage_percentage"], 0.0);
    assert_eq!(value["failures"].as_array().unwrap().len(), 0);
}

#[test]
fn test_analyze_syntax_error_exits_2() {
    let dir = create_project(&[("good.py", GOOD), ("broken.py", "def f(:\n")]);
    let output = run_docugen(dir.path(), &["analyze", "good.py", "broken.py"]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("good.py (good)"));
    assert!(stdout.contains("error: broken.py: syntax error at line 1"), "{stdout}");
}

#[test]
fn test_analyze_missing_path_exits_2() {
    let dir = create_project(&[]);
    let output = run_docugen(dir.path(), &["analyze", "nope.py"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("docugen analyze: no such file or directory: nope.py"));
}
