use crate::OutputFormatter;
use docugen_enforce::rules::RuleInfo;
use docugen_enforce::types::{
    AnalysisBatch, BatchResult, FileOutcome, FileReport, ValidationReport,
};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &FileReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_analysis(&self, batch: &AnalysisBatch) -> String {
        serde_json::to_string_pretty(batch).unwrap_or_default()
    }
    fn format_comparison(&self, outcome: &FileOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_default()
    }
    fn format_batch(&self, result: &BatchResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_validation(&self, report: &ValidationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_rules(&self, rules: &[RuleInfo]) -> String {
        serde_json::to_string_pretty(rules).unwrap_or_default()
    }
}
