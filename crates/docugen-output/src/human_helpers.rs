use docugen_enforce::types::{KindCounts, RuleViolation};

pub(crate) fn format_violation_human(path: &str, v: &RuleViolation) -> String {
    format!(
        "warning[{}]: {}\n  --> {}:{} ({})\n",
        v.rule, v.message, path, v.line, v.qualified_path,
    )
}

pub(crate) fn format_counts(label: &str, counts: &KindCounts) -> String {
    format!("  {:<12}{}/{} documented\n", label, counts.documented, counts.total)
}

/// `+12.50`, `-3.00`, `+0.00`.
pub(crate) fn format_delta(before: f64, after: f64) -> String {
    let delta = after - before;
    if delta < 0.0 {
        format!("{:.2}", delta)
    } else {
        format!("+{:.2}", delta)
    }
}
