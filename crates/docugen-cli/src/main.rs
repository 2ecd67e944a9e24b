//! docugen CLI: docstring coverage, compliance checks, and generation for Python.
//!
//! This binary provides the `docugen` command with subcommands for analysis,
//! threshold validation, and instrumentation. See `docugen --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn docugen_output::OutputFormatter> = if cli.json {
        Box::new(docugen_output::json::JsonFormatter)
    } else {
        Box::new(docugen_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Analyze { paths } => commands::analyze::run(&*formatter, paths),
        Commands::Validate {
            paths,
            min_coverage,
            min_compliance,
            output,
        } => commands::validate::run(&*formatter, paths, min_coverage, min_compliance, output),
        Commands::Instrument {
            paths,
            style,
            mode,
            write,
        } => commands::instrument::run(&*formatter, paths, style, mode, write),
        Commands::Rules => commands::rules::run(&*formatter),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}

/// Route diagnostics to stderr. `DOCUGEN_LOG` overrides the level chosen by
/// `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("DOCUGEN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
