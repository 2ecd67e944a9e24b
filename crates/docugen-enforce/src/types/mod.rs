mod batch;

pub use batch::*;

use serde::{Deserialize, Serialize};

use docugen_core::types::EntityKind;

/// Coverage and compliance summary for one source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub module: String,
    pub total_entities: usize,
    pub documented_entities: usize,
    pub coverage_percentage: f64,
    pub compliant_entities: usize,
    pub compliance_percentage: f64,
    pub functions: KindCounts,
    pub classes: KindCounts,
    pub per_entity: Vec<EntityReport>,
    pub violations: Vec<RuleViolation>,
}

impl QualityReport {
    pub fn undocumented_entities(&self) -> usize {
        self.total_entities - self.documented_entities
    }

    pub fn meets(&self, min_coverage: f64, min_compliance: f64) -> bool {
        self.coverage_percentage >= min_coverage && self.compliance_percentage >= min_compliance
    }
}

/// Documented / total counts for one group of entity kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindCounts {
    pub total: usize,
    pub documented: usize,
    /// Qualified paths lacking a docstring, in source order.
    pub undocumented: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityReport {
    pub qualified_path: String,
    pub kind: EntityKind,
    pub line: u32,
    pub is_present: bool,
    pub is_compliant: bool,
    pub rules_passed: usize,
    pub rules_total: usize,
    pub failed_rules: Vec<String>,
}

/// One failed rule on one docstring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub qualified_path: String,
    pub line: u32,
    pub rule: String,
    pub message: String,
}

/// Outcome of a single rule on a single docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub passed: bool,
    pub detail: String,
}

impl RuleResult {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Rewritten source and how many docstrings were inserted or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrumented {
    pub text: String,
    pub edit_count: usize,
}
