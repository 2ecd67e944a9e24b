use std::path::PathBuf;

use clap::{Parser, Subcommand};

use docugen_core::types::{DocstringStyle, InstrumentMode};

#[derive(Parser, Debug)]
#[command(
    name = "docugen",
    version,
    about = "Docstring coverage, compliance checks, and generation for Python"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log discovery and per-file progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Report docstring coverage and compliance
    Analyze {
        /// Files or directories (default: current directory)
        paths: Vec<PathBuf>,
    },

    /// Check coverage and compliance against thresholds
    Validate {
        /// Files or directories (default: current directory)
        paths: Vec<PathBuf>,
        /// Minimum coverage percentage (default from pyproject.toml, else 90)
        #[arg(long)]
        min_coverage: Option<f64>,
        /// Minimum compliance percentage (default from pyproject.toml, else 85)
        #[arg(long)]
        min_compliance: Option<f64>,
        /// Also write the JSON report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Insert or rewrite docstrings
    Instrument {
        /// Files or directories (default: current directory)
        paths: Vec<PathBuf>,
        /// Docstring style: google, numpy, or rest
        #[arg(long)]
        style: Option<DocstringStyle>,
        /// fill-gaps (only missing docstrings) or replace-all
        #[arg(long)]
        mode: Option<InstrumentMode>,
        /// Rewrite files in place instead of printing
        #[arg(long)]
        write: bool,
    },

    /// List compliance rules
    Rules,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
