//! Structural compliance rules for docstrings.
//!
//! Rule ids and descriptions are a stable contract: reports, JSON output,
//! and the `rules` command all key off them.

use std::collections::BTreeMap;

use docugen_core::types::{Docstring, DocumentableEntity, EntityKind, Span};
use docugen_parsers::python::helpers::parse_string_literal;

use crate::styles::{has_section, Section};
use crate::types::RuleResult;

pub const NON_EMPTY: &str = "non-empty";
pub const SUMMARY_PRESENT: &str = "summary-present";
pub const SUMMARY_TERMINATED: &str = "summary-terminated";
pub const BLANK_LINE_SEPARATION: &str = "blank-line-separation";
pub const PARAMS_DOCUMENTED: &str = "params-documented";
pub const RETURN_DOCUMENTED: &str = "return-documented";
pub const NO_TRAILING_WHITESPACE: &str = "no-trailing-whitespace";
pub const PLAIN_LITERAL: &str = "plain-literal";
pub const TRIPLE_DOUBLE_QUOTES: &str = "triple-double-quotes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RuleInfo {
    pub id: &'static str,
    pub description: &'static str,
}

/// Every rule the engine knows, in report order.
pub const RULES: &[RuleInfo] = &[
    RuleInfo {
        id: NON_EMPTY,
        description: "Docstring body contains at least one non-whitespace character",
    },
    RuleInfo {
        id: SUMMARY_PRESENT,
        description: "First non-blank line is a sentence-like summary, not bare punctuation",
    },
    RuleInfo {
        id: SUMMARY_TERMINATED,
        description: "Summary line ends with a period, question mark, or exclamation mark",
    },
    RuleInfo {
        id: BLANK_LINE_SEPARATION,
        description: "A blank line separates the summary from any further detail",
    },
    RuleInfo {
        id: PARAMS_DOCUMENTED,
        description: "Every parameter (except the method receiver) is mentioned",
    },
    RuleInfo {
        id: RETURN_DOCUMENTED,
        description: "A returns section is present when the return annotation denotes a value",
    },
    RuleInfo {
        id: NO_TRAILING_WHITESPACE,
        description: "No line ends with spaces or tabs",
    },
    RuleInfo {
        id: PLAIN_LITERAL,
        description: "Docstring is a plain string literal (no prefix other than r or u)",
    },
    RuleInfo {
        id: TRIPLE_DOUBLE_QUOTES,
        description: "Docstring is delimited by triple double quotes",
    },
];

pub fn rule_info(id: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|r| r.id == id)
}

/// Rule outcomes for one entity's docstring.
///
/// Rules that do not apply (no parameters to document, no value returned)
/// are absent from `rule_results` rather than passed.
#[derive(Debug, Clone)]
pub struct DocstringAssessment<'a> {
    pub entity: &'a DocumentableEntity,
    pub is_present: bool,
    pub rule_results: BTreeMap<&'static str, RuleResult>,
}

impl<'a> DocstringAssessment<'a> {
    pub fn rules_total(&self) -> usize {
        self.rule_results.len()
    }

    pub fn rules_passed(&self) -> usize {
        self.rule_results.values().filter(|r| r.passed).count()
    }

    /// Present and passing every applicable rule.
    pub fn is_compliant(&self) -> bool {
        self.is_present && self.rule_results.values().all(|r| r.passed)
    }

    /// Failed rules in catalogue order.
    pub fn failures(&self) -> Vec<(&'static str, &RuleResult)> {
        RULES
            .iter()
            .filter_map(|info| {
                self.rule_results
                    .get(info.id)
                    .filter(|r| !r.passed)
                    .map(|r| (info.id, r))
            })
            .collect()
    }
}

/// Assess the docstring an entity already has. An entity without one gets
/// an assessment with `is_present == false` and no rule results.
pub fn assess(entity: &DocumentableEntity) -> DocstringAssessment<'_> {
    match &entity.existing_docstring {
        Some(doc) => DocstringAssessment {
            entity,
            is_present: true,
            rule_results: evaluate(doc, entity),
        },
        None => DocstringAssessment {
            entity,
            is_present: false,
            rule_results: BTreeMap::new(),
        },
    }
}

/// Assess a docstring literal that is not (yet) part of the source, such as
/// a freshly synthesized one.
pub fn assess_literal<'a>(
    entity: &'a DocumentableEntity,
    literal: &str,
) -> Option<DocstringAssessment<'a>> {
    let doc = parse_string_literal(literal, Span::default())?;
    Some(DocstringAssessment {
        entity,
        is_present: true,
        rule_results: evaluate(&doc, entity),
    })
}

/// Run every applicable rule on `doc`.
pub fn evaluate(doc: &Docstring, entity: &DocumentableEntity) -> BTreeMap<&'static str, RuleResult> {
    let body = doc.body.as_str();
    let mut results = BTreeMap::new();

    results.insert(NON_EMPTY, check_non_empty(body));
    let summary = summary_line(body);
    results.insert(SUMMARY_PRESENT, check_summary_present(summary));
    results.insert(SUMMARY_TERMINATED, check_summary_terminated(summary));
    results.insert(BLANK_LINE_SEPARATION, check_blank_line_separation(body));

    let params = if entity.kind.is_callable() {
        entity.documented_parameters()
    } else {
        &[]
    };
    if !params.is_empty() {
        let missing: Vec<String> = params
            .iter()
            .filter(|p| !mentions(body, &p.name))
            .map(|p| p.display_name())
            .collect();
        let result = if missing.is_empty() {
            RuleResult::pass(format!("all {} parameter(s) documented", params.len()))
        } else {
            RuleResult::fail(format!("undocumented parameter(s): {}", missing.join(", ")))
        };
        results.insert(PARAMS_DOCUMENTED, result);
    }

    if entity.kind != EntityKind::Class && entity.returns_value() {
        let documented = has_section(body, Section::Returns)
            || (entity.is_generator && has_section(body, Section::Yields));
        let result = if documented {
            RuleResult::pass("returns section present")
        } else {
            RuleResult::fail(format!(
                "returns `{}` but has no returns section",
                entity.return_annotation.as_deref().unwrap_or_default()
            ))
        };
        results.insert(RETURN_DOCUMENTED, result);
    }

    results.insert(
        NO_TRAILING_WHITESPACE,
        check_trailing_whitespace(body, doc.span.start.line),
    );

    results.insert(
        PLAIN_LITERAL,
        if doc.is_plain_literal() {
            RuleResult::pass("plain string literal")
        } else {
            RuleResult::fail(format!("`{}`-prefixed literal is not a docstring", doc.prefix))
        },
    );
    results.insert(
        TRIPLE_DOUBLE_QUOTES,
        if doc.is_triple_double_quoted() {
            RuleResult::pass("delimited by \"\"\"")
        } else {
            RuleResult::fail(format!("delimited by {} instead of \"\"\"", doc.quote))
        },
    );

    results
}

/// The first non-blank line, trimmed.
fn summary_line(body: &str) -> &str {
    body.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
}

fn check_non_empty(body: &str) -> RuleResult {
    if body.trim().is_empty() {
        RuleResult::fail("docstring is empty")
    } else {
        RuleResult::pass("docstring has content")
    }
}

fn check_summary_present(summary: &str) -> RuleResult {
    if summary.chars().any(char::is_alphanumeric) {
        RuleResult::pass("summary line present")
    } else if summary.is_empty() {
        RuleResult::fail("no summary line")
    } else {
        RuleResult::fail(format!("summary `{summary}` has no words"))
    }
}

fn check_summary_terminated(summary: &str) -> RuleResult {
    if summary.ends_with(['.', '!', '?']) {
        RuleResult::pass("summary ends with punctuation")
    } else {
        RuleResult::fail(format!("summary `{summary}` does not end with a period"))
    }
}

fn check_blank_line_separation(body: &str) -> RuleResult {
    let mut lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .skip_while(|l| l.is_empty())
        .collect();
    while lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }
    match lines.get(1) {
        Some(second) if !second.is_empty() => {
            RuleResult::fail("summary is not followed by a blank line")
        }
        _ => RuleResult::pass("summary separated from detail"),
    }
}

/// Lines are reported with `first_line` being the line of the opening quote.
fn check_trailing_whitespace(body: &str, first_line: u32) -> RuleResult {
    let lines: Vec<&str> = body.split('\n').collect();
    let last = lines.len() - 1;
    let offending: Vec<String> = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            // the closing-delimiter line holds only indentation
            let closing_indent = *i == last && *i > 0 && line.trim().is_empty();
            !closing_indent && line.ends_with([' ', '\t'])
        })
        .map(|(i, _)| (first_line as usize + i).to_string())
        .collect();
    if offending.is_empty() {
        RuleResult::pass("no trailing whitespace")
    } else {
        RuleResult::fail(format!("trailing whitespace on line(s) {}", offending.join(", ")))
    }
}

/// Whether `name` appears in `text` as a whole identifier.
pub fn mentions(text: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(name).any(|(i, _)| {
        let before = text[..i].chars().next_back();
        let after = text[i + name.len()..].chars().next();
        !before.map_or(false, is_ident) && !after.map_or(false, is_ident)
    })
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
