//! Node-level extraction helpers: parameters, docstring literals, raise and
//! yield detection, class attributes, indentation.

use std::collections::BTreeSet;

use tree_sitter::Node;

use docugen_core::types::{Attribute, Docstring, Parameter, Position, Span};

use crate::treesitter::node_text;

/// Node kinds whose bodies belong to a different scope.
const SCOPE_BOUNDARIES: &[&str] = &[
    "function_definition",
    "class_definition",
    "decorated_definition",
    "lambda",
];

pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

pub fn start_position(node: Node<'_>) -> Position {
    let p = node.start_position();
    Position::new(p.row as u32 + 1, p.column as u32, node.start_byte())
}

pub fn end_position(node: Node<'_>) -> Position {
    let p = node.end_position();
    Position::new(p.row as u32 + 1, p.column as u32, node.end_byte())
}

pub fn node_span(node: Node<'_>) -> Span {
    Span::new(start_position(node), end_position(node))
}

/// Position of an arbitrary byte offset.
pub fn position_at(source: &str, offset: usize) -> Position {
    let before = &source[..offset];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Position::new(line, (offset - line_start) as u32, offset)
}

/// Leading whitespace of the line containing `offset`.
pub fn line_indent(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Indentation unit of the file: the indentation of the first line that
/// opens a block at column zero. Four spaces when nothing is indented.
pub fn detect_indent_unit(source: &str) -> String {
    let mut opens_block = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent: String = line
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        if opens_block && !indent.is_empty() {
            return indent;
        }
        opens_block = indent.is_empty() && strip_comment(trimmed).ends_with(':');
    }
    "    ".to_string()
}

fn strip_comment(line: &str) -> &str {
    // Good enough for a header line; a `#` inside a string literal would
    // only make the line look like it does not open a block.
    line.split('#').next().unwrap_or(line).trim_end()
}

/// First statement of a block, skipping comments.
pub fn first_statement<'t>(block: Node<'t>) -> Option<Node<'t>> {
    named_children(block)
        .into_iter()
        .find(|n| n.kind() != "comment")
}

/// The docstring literal of a statement, if the statement is a lone string.
pub fn docstring_of(stmt: Node<'_>, source: &[u8]) -> Option<Docstring> {
    if stmt.kind() != "expression_statement" {
        return None;
    }
    let exprs: Vec<Node<'_>> = named_children(stmt)
        .into_iter()
        .filter(|n| n.kind() != "comment")
        .collect();
    let &[expr] = exprs.as_slice() else {
        return None;
    };
    literal_docstring(expr, source)
}

/// A string, implicit concatenation, or either wrapped in parentheses. The
/// span of a parenthesized literal covers the parentheses.
fn literal_docstring(expr: Node<'_>, source: &[u8]) -> Option<Docstring> {
    match expr.kind() {
        "string" => parse_string_literal(node_text(expr, source), node_span(expr)),
        "concatenated_string" => {
            let parts: Vec<Docstring> = named_children(expr)
                .into_iter()
                .filter(|n| n.kind() == "string")
                .filter_map(|n| parse_string_literal(node_text(n, source), node_span(n)))
                .collect();
            let first = parts.first()?;
            Some(Docstring {
                raw_text: node_text(expr, source).to_string(),
                body: parts.iter().map(|p| p.body.as_str()).collect(),
                prefix: first.prefix.clone(),
                quote: first.quote.clone(),
                span: node_span(expr),
            })
        }
        "parenthesized_expression" => {
            let inner: Vec<Node<'_>> = named_children(expr)
                .into_iter()
                .filter(|n| n.kind() != "comment")
                .collect();
            let &[inner] = inner.as_slice() else {
                return None;
            };
            let literal = literal_docstring(inner, source)?;
            Some(Docstring {
                raw_text: node_text(expr, source).to_string(),
                span: node_span(expr),
                ..literal
            })
        }
        _ => None,
    }
}

/// Split a string literal into prefix, delimiter, and body.
pub fn parse_string_literal(text: &str, span: Span) -> Option<Docstring> {
    let prefix_len = text
        .find(|c: char| c == '"' || c == '\'')
        .filter(|&i| text[..i].chars().all(|c| c.is_ascii_alphabetic()))?;
    let rest = &text[prefix_len..];
    let quote = if rest.starts_with("\"\"\"") {
        "\"\"\""
    } else if rest.starts_with("'''") {
        "'''"
    } else {
        &rest[..1]
    };
    if rest.len() < quote.len() * 2 {
        return None;
    }
    let body = &rest[quote.len()..rest.len() - quote.len()];
    Some(Docstring {
        raw_text: text.to_string(),
        body: body.to_string(),
        prefix: text[..prefix_len].to_ascii_lowercase(),
        quote: quote.to_string(),
        span,
    })
}

/// Parameters of a `parameters` node, in order.
///
/// Separators (`*`, `/`) are skipped; unrecognized forms are left out rather
/// than guessed at.
pub fn extract_parameters(params: Node<'_>, source: &[u8]) -> Vec<Parameter> {
    named_children(params)
        .into_iter()
        .filter_map(|child| parameter_from(child, source))
        .collect()
}

fn parameter_from(node: Node<'_>, source: &[u8]) -> Option<Parameter> {
    let text_of = |field: &str| {
        node.child_by_field_name(field)
            .map(|n| node_text(n, source).trim().to_string())
    };
    match node.kind() {
        "identifier" => Some(Parameter::positional(node_text(node, source))),
        "list_splat_pattern" | "dictionary_splat_pattern" => Some(splat(node, source, None)),
        "typed_parameter" => {
            let inner = node.named_child(0)?;
            let ty = text_of("type");
            match inner.kind() {
                "identifier" => Some(Parameter {
                    type_annotation: ty,
                    ..Parameter::positional(node_text(inner, source))
                }),
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    Some(splat(inner, source, ty))
                }
                _ => None,
            }
        }
        "default_parameter" => Some(Parameter {
            default_value_repr: text_of("value"),
            ..Parameter::positional(&text_of("name")?)
        }),
        "typed_default_parameter" => Some(Parameter {
            type_annotation: text_of("type"),
            default_value_repr: text_of("value"),
            ..Parameter::positional(&text_of("name")?)
        }),
        _ => None,
    }
}

fn splat(node: Node<'_>, source: &[u8], ty: Option<String>) -> Parameter {
    let keyword = node.kind() == "dictionary_splat_pattern";
    let name = node_text(node, source).trim_start_matches('*').trim();
    Parameter {
        name: name.to_string(),
        type_annotation: ty,
        default_value_repr: None,
        is_variadic: !keyword,
        is_keyword_variadic: keyword,
    }
}

/// Decorator expression text without the leading `@`.
pub fn decorator_text(node: Node<'_>, source: &[u8]) -> String {
    node_text(node, source)
        .trim()
        .trim_start_matches('@')
        .trim()
        .to_string()
}

/// Whether the scope's own body contains `yield` or `yield from`.
pub fn body_yields(node: Node<'_>) -> bool {
    named_children(node).into_iter().any(|child| {
        if SCOPE_BOUNDARIES.contains(&child.kind()) {
            return false;
        }
        child.kind() == "yield" || body_yields(child)
    })
}

/// Exception names referenced by `raise` statements in the scope's own body.
///
/// `raise ValueError("x")`, `raise errors.Bad` and `raise Bad from e` all
/// contribute; a bare `raise` or `raise exc` (a lower-case variable) does not.
pub fn collect_raises(node: Node<'_>, source: &[u8], out: &mut BTreeSet<String>) {
    for child in named_children(node) {
        if SCOPE_BOUNDARIES.contains(&child.kind()) {
            continue;
        }
        if child.kind() == "raise_statement" {
            if let Some(name) = child.named_child(0).and_then(|e| exception_name(e, source)) {
                out.insert(name);
            }
            continue;
        }
        collect_raises(child, source, out);
    }
}

fn exception_name(expr: Node<'_>, source: &[u8]) -> Option<String> {
    let target = match expr.kind() {
        "call" => expr.child_by_field_name("function")?,
        "identifier" | "attribute" => expr,
        _ => return None,
    };
    if !matches!(target.kind(), "identifier" | "attribute") {
        return None;
    }
    let name: String = node_text(target, source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let last = name.rsplit('.').next()?;
    if last.chars().next()?.is_uppercase() {
        Some(name)
    } else {
        None
    }
}

/// Attributes of a class body: annotated class-level fields plus
/// `self.<name>` assignments made inside `__init__`.
pub fn collect_class_attributes(body: Node<'_>, source: &[u8]) -> Vec<Attribute> {
    let mut attrs: Vec<Attribute> = Vec::new();
    for stmt in named_children(body) {
        match stmt.kind() {
            "expression_statement" => {
                for assign in named_children(stmt) {
                    if assign.kind() != "assignment" {
                        continue;
                    }
                    let (Some(left), Some(ty)) = (
                        assign.child_by_field_name("left"),
                        assign.child_by_field_name("type"),
                    ) else {
                        continue;
                    };
                    if left.kind() == "identifier" {
                        push_attribute(
                            &mut attrs,
                            node_text(left, source),
                            Some(node_text(ty, source)),
                        );
                    }
                }
            }
            "function_definition" | "decorated_definition" => {
                let def = if stmt.kind() == "decorated_definition" {
                    match stmt.child_by_field_name("definition") {
                        Some(d) => d,
                        None => continue,
                    }
                } else {
                    stmt
                };
                let is_init = def
                    .child_by_field_name("name")
                    .map_or(false, |n| node_text(n, source) == "__init__");
                if !is_init {
                    continue;
                }
                let receiver = def
                    .child_by_field_name("parameters")
                    .and_then(|p| extract_parameters(p, source).into_iter().next())
                    .map(|p| p.name)
                    .unwrap_or_else(|| "self".to_string());
                if let Some(init_body) = def.child_by_field_name("body") {
                    collect_receiver_assignments(init_body, source, &receiver, &mut attrs);
                }
            }
            _ => {}
        }
    }
    attrs
}

fn collect_receiver_assignments(
    node: Node<'_>,
    source: &[u8],
    receiver: &str,
    attrs: &mut Vec<Attribute>,
) {
    for child in named_children(node) {
        if SCOPE_BOUNDARIES.contains(&child.kind()) {
            continue;
        }
        if child.kind() == "assignment" {
            if let Some(left) = child.child_by_field_name("left") {
                let object = left.child_by_field_name("object");
                let attribute = left.child_by_field_name("attribute");
                if let (Some(object), Some(attribute)) = (object, attribute) {
                    if left.kind() == "attribute" && node_text(object, source) == receiver {
                        let ty = child
                            .child_by_field_name("type")
                            .map(|t| node_text(t, source));
                        push_attribute(attrs, node_text(attribute, source), ty);
                    }
                }
            }
        }
        collect_receiver_assignments(child, source, receiver, attrs);
    }
}

fn push_attribute(attrs: &mut Vec<Attribute>, name: &str, ty: Option<&str>) {
    if attrs.iter().any(|a| a.name == name) {
        return;
    }
    attrs.push(Attribute {
        name: name.to_string(),
        type_annotation: ty.map(|t| t.trim().to_string()),
    });
}
