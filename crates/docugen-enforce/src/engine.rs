use docugen_core::types::{DocstringStyle, DocumentableEntity, InstrumentMode};
use docugen_parsers::python::{PyEntityBuilder, DEFAULT_MODULE_NAME};
use docugen_parsers::treesitter::ParseError;

use crate::aggregate::aggregate;
use crate::inject::{apply_edits, docstring_edit, Edit, EditConflict, LineEnding};
use crate::rules::assess;
use crate::synthesize::synthesize;
use crate::types::{Instrumented, QualityReport};

#[derive(Debug, thiserror::Error)]
pub enum InstrumentError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("edit conflict: {0}")]
    Conflict(#[from] EditConflict),
}

/// Analysis and instrumentation settings for one kind of request.
///
/// The engine holds no state between calls; every call builds its entity
/// list, assessments, and report from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct DocEngine {
    pub style: DocstringStyle,
    pub mode: InstrumentMode,
    pub module_name: String,
}

impl Default for DocEngine {
    fn default() -> Self {
        Self {
            style: DocstringStyle::default(),
            mode: InstrumentMode::default(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

impl DocEngine {
    pub fn new(style: DocstringStyle, mode: InstrumentMode) -> Self {
        Self {
            style,
            mode,
            ..Self::default()
        }
    }

    /// Name used for the module entity and its synthesized summary.
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    pub fn entities(&self, source: &str) -> Result<Vec<DocumentableEntity>, ParseError> {
        PyEntityBuilder::new().build(source, &self.module_name)
    }

    /// Coverage and compliance of the docstrings already in `source`.
    pub fn analyze(&self, source: &str) -> Result<QualityReport, ParseError> {
        let entities = self.entities(source)?;
        let assessments: Vec<_> = entities.iter().map(assess).collect();
        Ok(aggregate(&self.module_name, &entities, &assessments))
    }

    /// One edit per entity that the current mode wants documented.
    pub fn plan_edits(&self, source: &str, entities: &[DocumentableEntity]) -> Vec<Edit> {
        let newline = LineEnding::detect(source);
        entities
            .iter()
            .filter(|e| !e.is_vacuous_module())
            .filter(|e| self.mode == InstrumentMode::ReplaceAll || !e.has_docstring())
            .map(|e| docstring_edit(source, e, &synthesize(e, self.style), newline))
            .collect()
    }

    /// Rewrite `source` with synthesized docstrings.
    pub fn instrument(&self, source: &str) -> Result<Instrumented, InstrumentError> {
        let entities = self.entities(source)?;
        let edits = self.plan_edits(source, &entities);
        let text = apply_edits(source, &edits)?;
        Ok(Instrumented {
            text,
            edit_count: edits.len(),
        })
    }
}

/// Analyze `source` with default settings.
pub fn analyze(source: &str) -> Result<QualityReport, ParseError> {
    DocEngine::default().analyze(source)
}

/// Instrument `source` in `style` under `mode`.
pub fn instrument(
    source: &str,
    style: DocstringStyle,
    mode: InstrumentMode,
) -> Result<Instrumented, InstrumentError> {
    DocEngine::new(style, mode).instrument(source)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
