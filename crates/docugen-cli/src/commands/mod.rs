pub mod analyze;
pub mod completion;
pub mod input;
pub mod instrument;
pub mod rules;
pub mod validate;

/// Print formatter output to stdout with exactly one trailing newline.
pub(crate) fn emit(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
