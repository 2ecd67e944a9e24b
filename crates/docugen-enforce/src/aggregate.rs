//! Coverage and compliance scoring.

use std::collections::HashMap;

use docugen_core::types::{DocumentableEntity, EntityKind};

use crate::rules::DocstringAssessment;
use crate::types::{EntityReport, KindCounts, QualityReport, RuleViolation};

/// Round to the two decimals every report uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 * part / whole`, rounded; `empty` when `whole` is zero.
pub fn percentage(part: usize, whole: usize, empty: f64) -> f64 {
    if whole == 0 {
        empty
    } else {
        round2(100.0 * part as f64 / whole as f64)
    }
}

/// Build the report for `entities`. An entity with no matching assessment
/// counts as undocumented.
pub fn aggregate(
    module: &str,
    entities: &[DocumentableEntity],
    assessments: &[DocstringAssessment<'_>],
) -> QualityReport {
    let mut documented = 0;
    let mut compliant = 0;
    let mut functions = KindCounts::default();
    let mut classes = KindCounts::default();
    let mut per_entity = Vec::with_capacity(entities.len());
    let mut violations = Vec::new();

    // keyed by entity address; assessments borrow from `entities`
    let by_entity: HashMap<*const DocumentableEntity, &DocstringAssessment<'_>> = assessments
        .iter()
        .map(|a| (a.entity as *const DocumentableEntity, a))
        .collect();

    for entity in entities {
        let assessment = by_entity.get(&(entity as *const DocumentableEntity)).copied();
        let vacuous = entity.is_vacuous_module();
        let is_present = vacuous || assessment.map_or(false, |a| a.is_present);
        let is_compliant = vacuous || assessment.map_or(false, |a| a.is_compliant());
        if is_present {
            documented += 1;
        }
        if is_compliant {
            compliant += 1;
        }

        let counts = match entity.kind {
            EntityKind::Module => None,
            EntityKind::Class => Some(&mut classes),
            _ => Some(&mut functions),
        };
        if let Some(counts) = counts {
            counts.total += 1;
            if is_present {
                counts.documented += 1;
            } else {
                counts.undocumented.push(entity.qualified_path.clone());
            }
        }

        let line = entity
            .existing_docstring
            .as_ref()
            .map_or(entity.span.start.line, |d| d.span.start.line);
        let mut failed_rules = Vec::new();
        if let Some(a) = assessment {
            for (rule, result) in a.failures() {
                failed_rules.push(rule.to_string());
                violations.push(RuleViolation {
                    qualified_path: entity.qualified_path.clone(),
                    line,
                    rule: rule.to_string(),
                    message: result.detail.clone(),
                });
            }
        }

        per_entity.push(EntityReport {
            qualified_path: entity.qualified_path.clone(),
            kind: entity.kind,
            line: entity.span.start.line,
            is_present,
            is_compliant,
            rules_passed: assessment.map_or(0, |a| a.rules_passed()),
            rules_total: assessment.map_or(0, |a| a.rules_total()),
            failed_rules,
        });
    }

    QualityReport {
        module: module.to_string(),
        total_entities: entities.len(),
        documented_entities: documented,
        // an empty entity list is vacuously documented
        coverage_percentage: percentage(documented, entities.len(), 100.0),
        compliant_entities: compliant,
        compliance_percentage: percentage(compliant, documented, 0.0),
        functions,
        classes,
        per_entity,
        violations,
    }
}
