use docugen_enforce::rules::RULES;
use docugen_output::OutputFormatter;

/// Run `docugen rules`: list the compliance rule catalogue.
pub fn run(formatter: &dyn OutputFormatter) -> i32 {
    super::emit(&formatter.format_rules(RULES));
    0
}
