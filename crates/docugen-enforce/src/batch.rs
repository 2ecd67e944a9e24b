//! Multi-file processing.
//!
//! Files are independent, so each one is analyzed and instrumented on the
//! rayon pool. Results come back in input order. Reading and writing files
//! stays with the caller.

use std::path::Path;

use rayon::prelude::*;

use crate::aggregate::percentage;
use crate::engine::DocEngine;
use crate::types::{
    AnalysisBatch, BatchResult, BatchSummary, FileFailure, FileOutcome, FileReport,
    FileValidation, QualityReport, Thresholds, ValidationConfig, ValidationReport,
    ValidationSummary,
};

/// A source file already read into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Module name for the file: its stem, or the package name for
    /// `__init__.py`.
    pub fn module_name(&self) -> String {
        let path = Path::new(&self.path);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem == "__init__" {
            if let Some(package) = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
            {
                return package.to_string();
            }
        }
        stem.to_string()
    }
}

fn engine_for(engine: &DocEngine, file: &SourceFile) -> DocEngine {
    let name = file.module_name();
    if name.is_empty() {
        engine.clone()
    } else {
        engine.clone().with_module_name(name)
    }
}

/// Analyze every file without changing it.
pub fn analyze_files(files: &[SourceFile], engine: &DocEngine) -> AnalysisBatch {
    let results: Vec<Result<FileReport, FileFailure>> = files
        .par_iter()
        .map(|file| {
            engine_for(engine, file)
                .analyze(&file.text)
                .map(|report| FileReport {
                    path: file.path.clone(),
                    report,
                })
                .map_err(|e| FileFailure {
                    path: file.path.clone(),
                    error: e.to_string(),
                })
        })
        .collect();

    let mut batch = AnalysisBatch::default();
    for result in results {
        match result {
            Ok(report) => batch.reports.push(report),
            Err(failure) => batch.failures.push(failure),
        }
    }
    batch
}

/// Analyze, instrument, and re-analyze every file.
pub fn process_files(files: &[SourceFile], engine: &DocEngine) -> BatchResult {
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|file| process_one(file, &engine_for(engine, file)))
        .collect();
    let summary = summarize(&outcomes);
    BatchResult {
        files: outcomes,
        summary,
    }
}

fn process_one(file: &SourceFile, engine: &DocEngine) -> FileOutcome {
    let failed = |error: String| FileOutcome {
        path: file.path.clone(),
        before: None,
        after: None,
        instrumented: None,
        edit_count: 0,
        error: Some(error),
    };

    let before = match engine.analyze(&file.text) {
        Ok(report) => report,
        Err(e) => return failed(e.to_string()),
    };
    let instrumented = match engine.instrument(&file.text) {
        Ok(out) => out,
        Err(e) => return failed(e.to_string()),
    };
    let after = match engine.analyze(&instrumented.text) {
        Ok(report) => report,
        Err(e) => return failed(format!("instrumented text does not parse: {e}")),
    };

    FileOutcome {
        path: file.path.clone(),
        before: Some(before),
        after: Some(after),
        edit_count: instrumented.edit_count,
        instrumented: Some(instrumented),
        error: None,
    }
}

/// Totals across files; failed files contribute only to `failed_files`.
pub fn summarize(outcomes: &[FileOutcome]) -> BatchSummary {
    let mut summary = BatchSummary {
        files: outcomes.len(),
        ..BatchSummary::default()
    };
    let mut compliant_before = 0;
    let mut compliant_after = 0;

    for outcome in outcomes {
        let (Some(before), Some(after)) = (&outcome.before, &outcome.after) else {
            summary.failed_files += 1;
            continue;
        };
        summary.total_entities += before.total_entities;
        summary.documented_before += before.documented_entities;
        summary.documented_after += after.documented_entities;
        compliant_before += before.compliant_entities;
        compliant_after += after.compliant_entities;
        summary.edits += outcome.edit_count;
    }

    summary.coverage_before = percentage(summary.documented_before, summary.total_entities, 100.0);
    summary.coverage_after = percentage(summary.documented_after, summary.total_entities, 100.0);
    summary.compliance_before = percentage(compliant_before, summary.documented_before, 0.0);
    summary.compliance_after = percentage(compliant_after, summary.documented_after, 0.0);
    summary
}

/// Check every file's existing docstrings against `thresholds`. A file that
/// does not parse fails.
pub fn validate_files(
    files: &[SourceFile],
    engine: &DocEngine,
    thresholds: Thresholds,
) -> ValidationReport {
    let results: Vec<FileValidation> = files
        .par_iter()
        .map(|file| {
            let report: Result<QualityReport, _> = engine_for(engine, file).analyze(&file.text);
            match report {
                Ok(report) => FileValidation {
                    filepath: file.path.clone(),
                    coverage: report.coverage_percentage,
                    compliance: report.compliance_percentage,
                    passed: report.meets(thresholds.min_coverage, thresholds.min_compliance),
                    error: None,
                },
                Err(e) => FileValidation {
                    filepath: file.path.clone(),
                    coverage: 0.0,
                    compliance: 0.0,
                    passed: false,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect();

    let passed = results.iter().filter(|r| r.passed).count();
    ValidationReport {
        config: ValidationConfig {
            style: engine.style,
            thresholds,
        },
        summary: ValidationSummary {
            total: results.len(),
            passed,
            failed: results.len() - passed,
        },
        files: results,
    }
}
