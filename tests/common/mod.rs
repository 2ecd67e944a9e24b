/// Shared test helpers for all docugen integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
pub mod generators;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get path to the compiled docugen binary, building it if needed.
#[allow(dead_code)]
pub fn docugen_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("docugen");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = workspace.join("target/debug/docugen");
    if fallback.exists() {
        return fallback;
    }
    let status = Command::new("cargo")
        .args(["build", "-p", "docugen-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build docugen");
    assert!(status.success(), "Failed to build docugen binary");
    fallback
}

/// Create a project directory from `(relative_path, content)` pairs.
///
/// Hold the returned TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }
    dir
}

/// Run docugen with `args` inside `dir`.
#[allow(dead_code)]
pub fn run_docugen(dir: &Path, args: &[&str]) -> Output {
    Command::new(docugen_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("DOCUGEN_LOG")
        .output()
        .expect("Failed to run docugen")
}

#[allow(dead_code)]
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[allow(dead_code)]
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
