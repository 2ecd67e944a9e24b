use std::path::PathBuf;

use docugen_enforce::batch::validate_files;
use docugen_enforce::types::Thresholds;
use docugen_enforce::DocEngine;
use docugen_output::OutputFormatter;

use super::input::{collect_files, load_config, read_sources};

/// Run `docugen validate [paths...]`: gate on coverage and compliance thresholds.
///
/// Exit codes: 0 when every file passes, 1 when any file falls short or no
/// file was checked, 2 when a file could not be read or parsed.
pub fn run(
    formatter: &dyn OutputFormatter,
    paths: Vec<PathBuf>,
    min_coverage: Option<f64>,
    min_compliance: Option<f64>,
    output: Option<PathBuf>,
) -> i32 {
    let config = load_config();
    let thresholds = Thresholds {
        min_coverage: min_coverage.unwrap_or(config.min_coverage),
        min_compliance: min_compliance.unwrap_or(config.min_compliance),
    };

    let files = match collect_files(&paths, &config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("docugen validate: {e}");
            return 2;
        }
    };
    let sources = match read_sources(&files) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("docugen validate: {e}");
            return 2;
        }
    };

    tracing::debug!(
        "validating {} file(s) at coverage >= {}%, compliance >= {}%",
        sources.len(),
        thresholds.min_coverage,
        thresholds.min_compliance,
    );
    let report = validate_files(&sources, &DocEngine::new(config.style, config.mode), thresholds);
    super::emit(&formatter.format_validation(&report));

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report).unwrap_or_default();
        if let Err(e) = std::fs::write(&path, json + "\n") {
            eprintln!("docugen validate: failed to write {}: {e}", path.display());
            return 2;
        }
        tracing::debug!("report written to {}", path.display());
    }

    if report.files.iter().any(|f| f.error.is_some()) {
        return 2;
    }
    if report.summary.total == 0 {
        eprintln!("docugen validate: no python files found");
        return 1;
    }
    if report.passed() {
        0
    } else {
        1
    }
}
