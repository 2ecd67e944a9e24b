//! Documentation engine for docugen.
//!
//! Works over the entity list produced by `docugen-parsers`:
//! - [`synthesize`]: signature-driven docstring text per style
//! - [`inject`]: reverse-order application of text edits
//! - [`rules`]: the compliance rule catalogue and per-docstring assessment
//! - [`aggregate`]: coverage and compliance percentages
//! - [`engine`]: the `analyze` / `instrument` entry points
//! - [`batch`]: multi-file before/after processing and threshold validation

pub mod aggregate;
pub mod batch;
pub mod engine;
pub mod inject;
pub mod rules;
pub mod styles;
pub mod synthesize;
pub mod types;

pub use docugen_parsers::treesitter::ParseError;
pub use engine::{analyze, instrument, DocEngine, InstrumentError};
