use crate::human_helpers::{format_counts, format_delta, format_violation_human};
use crate::OutputFormatter;
use docugen_enforce::rules::RuleInfo;
use docugen_enforce::types::{
    AnalysisBatch, BatchResult, FileOutcome, FileReport, ValidationReport,
};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, file: &FileReport) -> String {
        let (path, report) = (file.path.as_str(), &file.report);
        let mut out = format!("{} ({})\n", path, report.module);

        out.push_str(&format!(
            "  {:<12}{:.2}% ({}/{} documented)\n",
            "coverage:",
            report.coverage_percentage,
            report.documented_entities,
            report.total_entities,
        ));
        out.push_str(&format!(
            "  {:<12}{:.2}% ({}/{} compliant)\n",
            "compliance:",
            report.compliance_percentage,
            report.compliant_entities,
            report.documented_entities,
        ));
        out.push_str(&format_counts("functions:", &report.functions));
        out.push_str(&format_counts("classes:", &report.classes));

        let undocumented: Vec<&str> = report
            .per_entity
            .iter()
            .filter(|e| !e.is_present)
            .map(|e| e.qualified_path.as_str())
            .collect();
        if !undocumented.is_empty() {
            out.push_str(&format!("  {:<12}{}\n", "missing:", undocumented.join(", ")));
        }
        out.push_str(&format!("  {:<12}{}\n", "violations:", report.violations.len()));

        if !report.violations.is_empty() {
            out.push('\n');
            for v in &report.violations {
                out.push_str(&format_violation_human(path, v));
            }
        }

        out
    }

    fn format_analysis(&self, batch: &AnalysisBatch) -> String {
        let mut out = batch
            .reports
            .iter()
            .map(|r| self.format_report(r))
            .collect::<Vec<_>>()
            .join("\n");
        for failure in &batch.failures {
            out.push_str(&format!("error: {}: {}\n", failure.path, failure.error));
        }
        out
    }

    fn format_comparison(&self, outcome: &FileOutcome) -> String {
        let (Some(before), Some(after)) = (&outcome.before, &outcome.after) else {
            return format!(
                "error: {}: {}\n",
                outcome.path,
                outcome.error.as_deref().unwrap_or("not processed"),
            );
        };

        let mut out = format!("{}: {} docstring(s) written\n", outcome.path, outcome.edit_count);
        out.push_str(&format!(
            "  {:<12}{:.2}% -> {:.2}% ({})\n",
            "coverage:",
            before.coverage_percentage,
            after.coverage_percentage,
            format_delta(before.coverage_percentage, after.coverage_percentage),
        ));
        out.push_str(&format!(
            "  {:<12}{:.2}% -> {:.2}% ({})\n",
            "compliance:",
            before.compliance_percentage,
            after.compliance_percentage,
            format_delta(before.compliance_percentage, after.compliance_percentage),
        ));
        out
    }

    fn format_batch(&self, result: &BatchResult) -> String {
        let mut out = String::new();
        for outcome in &result.files {
            out.push_str(&self.format_comparison(outcome));
        }

        let s = &result.summary;
        out.push_str(&format!(
            "\n{} file(s), {} failed, {} docstring(s) written\n",
            s.files, s.failed_files, s.edits,
        ));
        out.push_str(&format!(
            "coverage {:.2}% -> {:.2}% ({}), compliance {:.2}% -> {:.2}% ({})\n",
            s.coverage_before,
            s.coverage_after,
            format_delta(s.coverage_before, s.coverage_after),
            s.compliance_before,
            s.compliance_after,
            format_delta(s.compliance_before, s.compliance_after),
        ));
        out
    }

    fn format_validation(&self, report: &ValidationReport) -> String {
        let mut out = format!(
            "Style: {}  Coverage threshold: {}%  Compliance threshold: {}%\n\n",
            report.config.style,
            report.config.thresholds.min_coverage,
            report.config.thresholds.min_compliance,
        );

        for f in &report.files {
            match &f.error {
                Some(err) => out.push_str(&format!("ERROR {}: {}\n", f.filepath, err)),
                None => out.push_str(&format!(
                    "{} {}  coverage {:.2}%  compliance {:.2}%\n",
                    if f.passed { "PASS " } else { "FAIL " },
                    f.filepath,
                    f.coverage,
                    f.compliance,
                )),
            }
        }

        out.push_str(&format!(
            "\nSUMMARY: {}/{} files passed\n",
            report.summary.passed, report.summary.total,
        ));
        out
    }

    fn format_rules(&self, rules: &[RuleInfo]) -> String {
        let width = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
        rules
            .iter()
            .map(|r| format!("{:<width$}  {}\n", r.id, r.description, width = width))
            .collect()
    }
}
