// Tests for `docugen rules` and `docugen completion`

use crate::common::{create_project, run_docugen, stderr_of, stdout_of};

#[test]
fn test_rules_lists_catalogue() {
    let dir = create_project(&[]);
    let output = run_docugen(dir.path(), &["rules"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 9);
    for id in ["non-empty", "params-documented", "triple-double-quotes"] {
        assert!(stdout.lines().any(|l| l.starts_with(id)), "missing {id}");
    }
}

#[test]
fn test_rules_json() {
    let dir = create_project(&[]);
    let output = run_docugen(dir.path(), &["--json", "rules"]);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let rules = value.as_array().unwrap();
    assert_eq!(rules.len(), 9);
    assert_eq!(rules[0]["id"], "non-empty");
}

#[test]
fn test_completion_bash() {
    let dir = create_project(&[]);
    let output = run_docugen(dir.path(), &["completion", "bash"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("docugen"));
}

#[test]
fn test_completion_unknown_shell() {
    let dir = create_project(&[]);
    let output = run_docugen(dir.path(), &["completion", "tcsh"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("unsupported shell 'tcsh'"));
}
