use docugen_core::types::DocstringStyle;
use serde::{Deserialize, Serialize};

use super::{Instrumented, QualityReport};

/// A quality report tagged with the file it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub report: QualityReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

/// Reports for every file that parsed, failures for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBatch {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

/// Before/after picture of one file run through the instrumenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: String,
    pub before: Option<QualityReport>,
    pub after: Option<QualityReport>,
    #[serde(skip)]
    pub instrumented: Option<Instrumented>,
    pub edit_count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub files: usize,
    pub failed_files: usize,
    pub total_entities: usize,
    pub documented_before: usize,
    pub documented_after: usize,
    pub coverage_before: f64,
    pub coverage_after: f64,
    pub compliance_before: f64,
    pub compliance_after: f64,
    pub edits: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub files: Vec<FileOutcome>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_coverage: f64,
    pub min_compliance: f64,
}

/// Settings a validation run was checked against, echoed in its report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub style: DocstringStyle,
    #[serde(flatten)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileValidation {
    pub filepath: String,
    pub coverage: f64,
    pub compliance: f64,
    pub passed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub config: ValidationConfig,
    pub files: Vec<FileValidation>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }
}
