use std::path::PathBuf;

use docugen_core::types::{DocstringStyle, InstrumentMode};
use docugen_enforce::batch::process_files;
use docugen_enforce::DocEngine;
use docugen_output::OutputFormatter;

use super::input::{collect_files, load_config, read_sources};

/// Run `docugen instrument [paths...]`: synthesize and insert docstrings.
///
/// With `--write` changed files are rewritten in place and the batch report
/// goes to stdout. Without it a single file's new text goes to stdout and
/// its before/after comparison to stderr; several files only get the report.
pub fn run(
    formatter: &dyn OutputFormatter,
    paths: Vec<PathBuf>,
    style: Option<DocstringStyle>,
    mode: Option<InstrumentMode>,
    write: bool,
) -> i32 {
    let config = load_config();
    let engine = DocEngine::new(style.unwrap_or(config.style), mode.unwrap_or(config.mode));

    let files = match collect_files(&paths, &config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("docugen instrument: {e}");
            return 2;
        }
    };
    if files.is_empty() {
        eprintln!("docugen instrument: no python files found");
        return 2;
    }
    let sources = match read_sources(&files) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("docugen instrument: {e}");
            return 2;
        }
    };

    tracing::debug!(
        "instrumenting {} file(s) in {} style ({})",
        sources.len(),
        engine.style,
        engine.mode,
    );
    let result = process_files(&sources, &engine);
    let failed = result.summary.failed_files > 0;

    if write {
        for (outcome, path) in result.files.iter().zip(&files) {
            let Some(instrumented) = &outcome.instrumented else {
                tracing::warn!("{}: {}", outcome.path, outcome.error.as_deref().unwrap_or("failed"));
                continue;
            };
            if instrumented.edit_count == 0 {
                tracing::debug!("{}: already documented", outcome.path);
                continue;
            }
            if let Err(e) = std::fs::write(path, &instrumented.text) {
                eprintln!("docugen instrument: failed to write {}: {e}", path.display());
                return 2;
            }
            tracing::debug!("{}: {} docstring(s) written", outcome.path, instrumented.edit_count);
        }
        super::emit(&formatter.format_batch(&result));
    } else if let [outcome] = result.files.as_slice() {
        match &outcome.instrumented {
            Some(instrumented) => print!("{}", instrumented.text),
            None => {
                eprintln!(
                    "docugen instrument: {}: {}",
                    outcome.path,
                    outcome.error.as_deref().unwrap_or("failed"),
                );
                return 2;
            }
        }
        eprint!("{}", terminated(formatter.format_comparison(outcome)));
    } else {
        tracing::warn!("{} files given without --write; reporting only", result.files.len());
        super::emit(&formatter.format_batch(&result));
    }

    if failed {
        2
    } else {
        0
    }
}

fn terminated(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
