//! Output formatters for docugen command results.
//!
//! Two output modes:
//! - **Human** (default): aligned plain-text reports for terminal users
//! - **JSON** (`--json`): machine-readable structured output keyed by rule id

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use docugen_enforce::rules::RuleInfo;
use docugen_enforce::types::{
    AnalysisBatch, BatchResult, FileOutcome, FileReport, ValidationReport,
};

pub trait OutputFormatter {
    fn format_report(&self, report: &FileReport) -> String;
    fn format_analysis(&self, batch: &AnalysisBatch) -> String;
    fn format_comparison(&self, outcome: &FileOutcome) -> String;
    fn format_batch(&self, result: &BatchResult) -> String;
    fn format_validation(&self, report: &ValidationReport) -> String;
    fn format_rules(&self, rules: &[RuleInfo]) -> String;
}
