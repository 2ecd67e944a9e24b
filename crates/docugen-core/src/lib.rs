//! Core types and configuration for docugen.
//!
//! This crate provides the data structures shared by every docugen crate:
//! - [`types`]: Documentable entities, source positions, docstring styles
//! - [`config`]: Configuration loading from `pyproject.toml` (`[tool.docugen]`)

pub mod config;
pub mod types;
