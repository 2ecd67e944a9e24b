use tree_sitter::{Language, Node, Parser, Tree};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parse Python source. Any grammar error anywhere in the tree fails the
    /// whole parse; no partial tree is handed out.
    pub fn parse(&mut self, source: &str) -> Result<Tree, ParseError> {
        let lang: Language = tree_sitter_python::LANGUAGE.into();
        self.parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        let tree = self
            .parser
            .parse(source.as_bytes(), None)
            .ok_or(ParseError::ParseFailed)?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error(root, source.as_bytes()));
        }
        Ok(tree)
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// `line` and `column` are both 1-based, matching Python's own
    /// `SyntaxError` reporting.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: u32,
        column: u32,
        message: String,
    },
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

impl ParseError {
    /// `(line, column)` of a syntax error, both 1-based.
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            ParseError::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

pub fn node_text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.start_byte()..node.end_byte()]).unwrap_or("")
}

fn syntax_error(root: Node<'_>, source: &[u8]) -> ParseError {
    let node = first_error_node(root).unwrap_or(root);
    let point = node.start_position();
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node_text(node, source);
        let snippet: String = text.lines().next().unwrap_or("").chars().take(24).collect();
        if snippet.trim().is_empty() {
            "invalid syntax".to_string()
        } else {
            format!("invalid syntax near `{}`", snippet.trim())
        }
    };
    ParseError::Syntax {
        line: point.row as u32 + 1,
        column: point.column as u32 + 1,
        message,
    }
}

/// First `ERROR` or `MISSING` node in document order.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

pub fn detect_python(path: &std::path::Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("py") | Some("pyi")
    )
}
