//! Structural model builder for Python source.
//!
//! Turns source text into an ordered list of [`DocumentableEntity`]: the
//! module first, then every class and function in preorder. Positions come
//! straight from the tree-sitter tree so that injected text lands exactly
//! where a docstring statement may begin.

pub mod helpers;

use std::collections::BTreeSet;

use tree_sitter::Node;

use docugen_core::types::{DocumentableEntity, EntityKind, Position, Span};

use crate::treesitter::{node_text, ParseError, TreeSitterParser};
use helpers::*;

/// Module name used when the caller does not supply one.
pub const DEFAULT_MODULE_NAME: &str = "<module>";

/// Statement kinds whose nested blocks may hold definitions.
const COMPOUND_KINDS: &[&str] = &[
    "block",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

pub struct PyEntityBuilder {
    parser: TreeSitterParser,
}

impl PyEntityBuilder {
    pub fn new() -> Self {
        Self {
            parser: TreeSitterParser::new(),
        }
    }

    /// Build the entity list for `source`. Fails without partial output when
    /// the source does not parse.
    pub fn build(
        &mut self,
        source: &str,
        module_name: &str,
    ) -> Result<Vec<DocumentableEntity>, ParseError> {
        let tree = self.parser.parse(source)?;
        let root = tree.root_node();

        let mut walk = Walk {
            source,
            bytes: source.as_bytes(),
            indent_unit: detect_indent_unit(source),
            entities: Vec::new(),
        };
        walk.push_module(root, module_name);
        let scope = Scope {
            kind: EntityKind::Module,
            path: String::new(),
        };
        walk.visit_statements(root, &scope);
        Ok(walk.entities)
    }
}

impl Default for PyEntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build entities with a fresh parser and the default module name.
pub fn build_entities(source: &str) -> Result<Vec<DocumentableEntity>, ParseError> {
    PyEntityBuilder::new().build(source, DEFAULT_MODULE_NAME)
}

struct Scope {
    kind: EntityKind,
    path: String,
}

impl Scope {
    fn qualify(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }
}

struct Walk<'s> {
    source: &'s str,
    bytes: &'s [u8],
    indent_unit: String,
    entities: Vec<DocumentableEntity>,
}

impl<'s> Walk<'s> {
    fn push_module(&mut self, root: Node<'_>, module_name: &str) {
        let end = position_at(self.source, self.source.len());
        let existing_docstring =
            first_statement(root).and_then(|stmt| docstring_of(stmt, self.bytes));
        self.entities.push(DocumentableEntity {
            kind: EntityKind::Module,
            name: module_name.to_string(),
            qualified_path: module_name.to_string(),
            span: Span::new(Position::new(1, 0, 0), end),
            header_end: position_at(self.source, module_header_end(self.source)),
            indent_level: String::new(),
            body_inline: false,
            parameters: vec![],
            return_annotation: None,
            decorators: vec![],
            raises_hints: BTreeSet::new(),
            attributes: vec![],
            existing_docstring,
            is_async: false,
            is_generator: false,
            parent_kind: None,
        });
    }

    fn visit_statements(&mut self, node: Node<'_>, scope: &Scope) {
        for child in named_children(node) {
            match child.kind() {
                "function_definition" | "class_definition" => {
                    self.visit_definition(child, child, vec![], scope)
                }
                "decorated_definition" => {
                    let Some(def) = child.child_by_field_name("definition") else {
                        continue;
                    };
                    let decorators = named_children(child)
                        .into_iter()
                        .filter(|n| n.kind() == "decorator")
                        .map(|n| decorator_text(n, self.bytes))
                        .collect();
                    self.visit_definition(child, def, decorators, scope);
                }
                kind if COMPOUND_KINDS.contains(&kind) => self.visit_statements(child, scope),
                _ => {}
            }
        }
    }

    /// `outer` is the decorated wrapper when there is one, otherwise `def`.
    fn visit_definition(
        &mut self,
        outer: Node<'_>,
        def: Node<'_>,
        decorators: Vec<String>,
        scope: &Scope,
    ) {
        // Definitions missing a name or body are excluded rather than guessed.
        let Some(name_node) = def.child_by_field_name("name") else {
            return;
        };
        let Some(body) = def.child_by_field_name("body") else {
            return;
        };
        let Some(colon) = header_colon(def, body) else {
            return;
        };
        let Some(first_stmt) = first_statement(body) else {
            return;
        };

        let name = node_text(name_node, self.bytes).to_string();
        let is_class = def.kind() == "class_definition";
        let is_async = !is_class && children(def).first().map_or(false, |c| c.kind() == "async");
        let is_generator = !is_class && body_yields(body);
        let kind = if is_class {
            EntityKind::Class
        } else if scope.kind == EntityKind::Class {
            EntityKind::Method
        } else if is_async {
            EntityKind::AsyncFunction
        } else if is_generator {
            EntityKind::GeneratorFunction
        } else {
            EntityKind::Function
        };

        let body_inline =
            on_header_line(&self.source[colon.end_byte()..first_stmt.start_byte()]);
        let (header_end, indent_level) = if body_inline {
            let indent = line_indent(self.source, def.start_byte()) + &self.indent_unit;
            (end_position(colon), indent)
        } else {
            let after = self.source[colon.end_byte()..]
                .find('\n')
                .map_or(colon.end_byte(), |i| colon.end_byte() + i + 1);
            (
                position_at(self.source, after),
                line_indent(self.source, first_stmt.start_byte()),
            )
        };

        let parameters = def
            .child_by_field_name("parameters")
            .map(|p| extract_parameters(p, self.bytes))
            .unwrap_or_default();
        let return_annotation = def
            .child_by_field_name("return_type")
            .map(|r| node_text(r, self.bytes).trim().to_string());
        let mut raises_hints = BTreeSet::new();
        if !is_class {
            collect_raises(body, self.bytes, &mut raises_hints);
        }
        let attributes = if is_class {
            collect_class_attributes(body, self.bytes)
        } else {
            vec![]
        };

        let qualified_path = scope.qualify(&name);
        self.entities.push(DocumentableEntity {
            kind,
            name,
            qualified_path: qualified_path.clone(),
            span: node_span(outer),
            header_end,
            indent_level,
            body_inline,
            parameters,
            return_annotation,
            decorators,
            raises_hints,
            attributes,
            existing_docstring: docstring_of(first_stmt, self.bytes),
            is_async,
            is_generator,
            parent_kind: Some(scope.kind),
        });

        let inner = Scope {
            kind,
            path: qualified_path,
        };
        self.visit_statements(body, &inner);
    }
}

/// The `:` token terminating a definition header.
fn header_colon<'t>(def: Node<'t>, body: Node<'t>) -> Option<Node<'t>> {
    children(def)
        .into_iter()
        .filter(|c| c.kind() == ":" && c.end_byte() <= body.start_byte())
        .last()
}

/// Whether the text between a header's `:` and the first body statement
/// stays on the header's logical line (only backslash continuations break
/// the physical line).
fn on_header_line(between: &str) -> bool {
    !between
        .replace("\\\r\n", "")
        .replace("\\\n", "")
        .contains('\n')
}

/// Offset where a module docstring may be inserted: after a byte order mark,
/// any leading comment lines (shebang, encoding cookie, license banner) and
/// blank lines.
fn module_header_end(source: &str) -> usize {
    let mut offset = source.strip_prefix('\u{feff}').map_or(0, |_| '\u{feff}'.len_utf8());
    for line in source[offset..].split_inclusive('\n') {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            break;
        }
        offset += line.len();
    }
    offset
}
