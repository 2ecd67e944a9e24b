use std::path::PathBuf;

use docugen_enforce::batch::analyze_files;
use docugen_enforce::DocEngine;
use docugen_output::OutputFormatter;

use super::input::{collect_files, load_config, read_sources};

/// Run `docugen analyze [paths...]`: coverage and compliance of existing docstrings.
pub fn run(formatter: &dyn OutputFormatter, paths: Vec<PathBuf>) -> i32 {
    let config = load_config();
    let files = match collect_files(&paths, &config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("docugen analyze: {e}");
            return 2;
        }
    };
    if files.is_empty() {
        eprintln!("docugen analyze: no python files found");
        return 2;
    }
    let sources = match read_sources(&files) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("docugen analyze: {e}");
            return 2;
        }
    };

    tracing::debug!("analyzing {} file(s)", sources.len());
    let batch = analyze_files(&sources, &DocEngine::new(config.style, config.mode));
    for failure in &batch.failures {
        tracing::warn!("{}: {}", failure.path, failure.error);
    }

    super::emit(&formatter.format_analysis(&batch));

    if batch.failures.is_empty() {
        0
    } else {
        2
    }
}
