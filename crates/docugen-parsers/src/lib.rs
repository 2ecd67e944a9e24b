//! Python front end for docugen.
//!
//! - [`treesitter`]: tree-sitter parsing and syntax-error reporting
//! - [`python`]: the structural model builder producing documentable entities
//! - [`walker`]: Python file discovery for batch runs

pub mod python;
pub mod treesitter;
pub mod walker;
