//! Configuration file loading for docugen.
//!
//! Reads the `[tool.docugen]` table of a project's `pyproject.toml`.
//! Falls back to defaults when the file or the table is missing; keys that
//! are absent from the table take their default values individually.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{DocstringStyle, InstrumentMode};

/// Top-level docugen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocugenConfig {
    #[serde(default)]
    pub style: DocstringStyle,
    #[serde(default)]
    pub mode: InstrumentMode,
    #[serde(default = "default_min_coverage")]
    pub min_coverage: f64,
    #[serde(default = "default_min_compliance")]
    pub min_compliance: f64,
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pyproject.toml: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Option<ToolTable>,
}

#[derive(Deserialize)]
struct ToolTable {
    #[serde(default)]
    docugen: Option<DocugenConfig>,
}

fn default_min_coverage() -> f64 {
    90.0
}
fn default_min_compliance() -> f64 {
    85.0
}
fn default_exclude_patterns() -> Vec<String> {
    ["tests/**", "venv/**", "__pycache__/**", ".*"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for DocugenConfig {
    fn default() -> Self {
        Self {
            style: DocstringStyle::default(),
            mode: InstrumentMode::default(),
            min_coverage: default_min_coverage(),
            min_compliance: default_min_compliance(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl DocugenConfig {
    pub const FILE_NAME: &'static str = "pyproject.toml";

    /// Load configuration from `pyproject.toml` inside `root`.
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_pyproject_str(&content)
    }

    pub fn from_pyproject_str(content: &str) -> Result<Self, ConfigError> {
        let pyproject: PyProject = toml::from_str(content)?;
        Ok(pyproject
            .tool
            .and_then(|t| t.docugen)
            .unwrap_or_default())
    }
}
