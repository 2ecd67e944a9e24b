//! Shared input handling: configuration lookup, path expansion, and reading
//! sources for every command that takes `paths`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use docugen_core::config::DocugenConfig;
use docugen_enforce::batch::SourceFile;
use docugen_parsers::walker::FileWalker;

/// Load `pyproject.toml` from the working directory. A broken file is
/// reported and replaced by defaults.
pub fn load_config() -> DocugenConfig {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("failed to get current directory: {e}; using default config");
            return DocugenConfig::default();
        }
    };
    match DocugenConfig::load(&cwd) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{e}; using default config");
            DocugenConfig::default()
        }
    }
}

/// Expand `paths` into Python files. Files named explicitly are always kept;
/// directories are walked with the configured exclude patterns. No paths
/// means the current directory.
pub fn collect_files(paths: &[PathBuf], config: &DocugenConfig) -> Result<Vec<PathBuf>, String> {
    let defaults = [PathBuf::from(".")];
    let paths = if paths.is_empty() { &defaults[..] } else { paths };

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let walker = FileWalker::new(path)
                .with_excludes(&config.exclude_patterns)
                .map_err(|e| format!("invalid exclude pattern: {e}"))?;
            let found = walker.walk();
            tracing::debug!("{}: {} python file(s)", path.display(), found.len());
            files.extend(found);
        } else {
            return Err(format!("no such file or directory: {}", path.display()));
        }
    }
    files.dedup();
    Ok(files)
}

/// Read every file into memory, keyed by its display path.
pub fn read_sources(files: &[PathBuf]) -> Result<Vec<SourceFile>, String> {
    files
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .map(|text| SourceFile::new(display_path(path), text))
                .map_err(|e| format!("failed to read {}: {e}", path.display()))
        })
        .collect()
}

/// `path` without leading `./` components.
pub fn display_path(path: &Path) -> String {
    let trimmed: PathBuf = path
        .components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect();
    trimmed.to_string_lossy().to_string()
}
