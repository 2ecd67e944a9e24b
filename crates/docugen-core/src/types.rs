use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kinds of documentable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Module,
    Class,
    Function,
    Method,
    AsyncFunction,
    GeneratorFunction,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Module => "module",
            EntityKind::Class => "class",
            EntityKind::Function => "function",
            EntityKind::Method => "method",
            EntityKind::AsyncFunction => "async-function",
            EntityKind::GeneratorFunction => "generator-function",
        }
    }

    /// True for every kind that has a parameter list.
    pub fn is_callable(&self) -> bool {
        !matches!(self, EntityKind::Module | EntityKind::Class)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in the source text.
///
/// `line` is 1-based, `column` is a 0-based byte column, `offset` is the
/// absolute byte offset into the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Half-open source range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether `other` lies within this span (bounds may touch).
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.offset < other.end.offset && other.start.offset < self.end.offset
    }

    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.start.offset..self.end.offset
    }
}

/// One formal parameter of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default_value_repr: Option<String>,
    pub is_variadic: bool,
    pub is_keyword_variadic: bool,
}

impl Parameter {
    pub fn positional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_annotation: None,
            default_value_repr: None,
            is_variadic: false,
            is_keyword_variadic: false,
        }
    }

    /// Name as written in the signature, including `*`/`**` markers.
    pub fn display_name(&self) -> String {
        if self.is_variadic {
            format!("*{}", self.name)
        } else if self.is_keyword_variadic {
            format!("**{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Instance or class attribute discovered on a class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub type_annotation: Option<String>,
}

/// A docstring literal already present in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docstring {
    /// The literal exactly as written, prefix and delimiters included.
    pub raw_text: String,
    /// Contents between the delimiters.
    pub body: String,
    /// String prefix such as `r`, `b` or `f` (lower-cased, empty when absent).
    pub prefix: String,
    /// Opening delimiter: `"""`, `'''`, `"` or `'`.
    pub quote: String,
    pub span: Span,
}

impl Docstring {
    /// Raw and unicode prefixes still denote an ordinary `str` literal.
    pub fn is_plain_literal(&self) -> bool {
        self.prefix.chars().all(|c| c == 'r' || c == 'u')
    }

    pub fn is_triple_double_quoted(&self) -> bool {
        self.quote == "\"\"\""
    }
}

/// A module, class, or callable that may carry a docstring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentableEntity {
    pub kind: EntityKind,
    pub name: String,
    /// Dotted path from the module root (`Outer.method.inner`).
    pub qualified_path: String,
    pub span: Span,
    /// Where a new docstring statement may legally begin.
    pub header_end: Position,
    /// Whitespace that prefixes every line of an injected docstring.
    pub indent_level: String,
    /// Body shares the header line (`def f(): pass`).
    pub body_inline: bool,
    pub parameters: Vec<Parameter>,
    pub return_annotation: Option<String>,
    pub decorators: Vec<String>,
    /// Exception names raised in the body. Best-effort: only literal `raise`
    /// statements are inspected, so re-raised variables and exceptions raised
    /// by callees are invisible.
    pub raises_hints: BTreeSet<String>,
    pub attributes: Vec<Attribute>,
    pub existing_docstring: Option<Docstring>,
    pub is_async: bool,
    pub is_generator: bool,
    pub parent_kind: Option<EntityKind>,
}

/// Return annotations that denote "no value".
const NO_VALUE_ANNOTATIONS: &[&str] = &[
    "None",
    "NoReturn",
    "Never",
    "typing.NoReturn",
    "typing.Never",
];

impl DocumentableEntity {
    pub fn has_docstring(&self) -> bool {
        self.existing_docstring.is_some()
    }

    /// A module with no statements at all (empty, or only comments and
    /// blank lines). It has nothing to document and counts as documented.
    pub fn is_vacuous_module(&self) -> bool {
        self.kind == EntityKind::Module
            && self.existing_docstring.is_none()
            && self.header_end.offset >= self.span.end.offset
    }

    pub fn is_staticmethod(&self) -> bool {
        self.decorators
            .iter()
            .any(|d| d == "staticmethod" || d.ends_with(".staticmethod"))
    }

    /// Parameters that belong in documentation: the implicit receiver
    /// (`self`/`cls`) of a non-static method is left out.
    pub fn documented_parameters(&self) -> &[Parameter] {
        let skip_receiver = self.kind == EntityKind::Method
            && !self.is_staticmethod()
            && self
                .parameters
                .first()
                .map_or(false, |p| !p.is_variadic && !p.is_keyword_variadic);
        if skip_receiver {
            &self.parameters[1..]
        } else {
            &self.parameters
        }
    }

    /// Whether the return annotation denotes a real value.
    pub fn returns_value(&self) -> bool {
        match self.return_annotation.as_deref().map(str::trim) {
            Some(ann) => !ann.is_empty() && !NO_VALUE_ANNOTATIONS.contains(&ann),
            None => false,
        }
    }
}

/// Docstring formatting conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocstringStyle {
    #[default]
    Google,
    Numpy,
    #[serde(alias = "reST", alias = "restructuredtext")]
    Rest,
}

impl DocstringStyle {
    pub const ALL: [DocstringStyle; 3] =
        [DocstringStyle::Google, DocstringStyle::Numpy, DocstringStyle::Rest];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocstringStyle::Google => "google",
            DocstringStyle::Numpy => "numpy",
            DocstringStyle::Rest => "rest",
        }
    }
}

impl std::fmt::Display for DocstringStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported docstring style `{0}` (expected google, numpy, or rest)")]
pub struct UnknownStyle(pub String);

impl FromStr for DocstringStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(DocstringStyle::Google),
            "numpy" | "numpydoc" => Ok(DocstringStyle::Numpy),
            "rest" | "restructuredtext" | "sphinx" => Ok(DocstringStyle::Rest),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

/// Which entities instrumentation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstrumentMode {
    /// Only add docstrings where none exist.
    #[default]
    FillGaps,
    /// Regenerate every docstring, replacing existing ones.
    ReplaceAll,
}

impl InstrumentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentMode::FillGaps => "fill-gaps",
            InstrumentMode::ReplaceAll => "replace-all",
        }
    }
}

impl std::fmt::Display for InstrumentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported instrument mode `{0}` (expected fill-gaps or replace-all)")]
pub struct UnknownMode(pub String);

impl FromStr for InstrumentMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "fill-gaps" | "fill" => Ok(InstrumentMode::FillGaps),
            "replace-all" | "replace" => Ok(InstrumentMode::ReplaceAll),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}
