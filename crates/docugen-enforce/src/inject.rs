//! Position-based text edits applied back to front.
//!
//! Every edit carries byte offsets into the *original* text. Applying them
//! from the end of the file towards the start keeps all not-yet-applied
//! offsets valid without any bookkeeping.

use std::ops::Range;

use docugen_core::types::DocumentableEntity;

/// Replace `range` of the original text with `replacement`. An empty range
/// is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            replacement: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            replacement: text.into(),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditConflict {
    #[error("conflicting edits at {first:?} and {second:?}")]
    Overlap {
        first: Range<usize>,
        second: Range<usize>,
    },
    #[error("edit range {range:?} is outside the source or splits a character")]
    OutOfBounds { range: Range<usize> },
}

/// Line-ending convention of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Decided by the first line break; LF when there is none.
    pub fn detect(source: &str) -> Self {
        match source.find('\n') {
            Some(i) if source[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Apply `edits` to `source`, producing a new string.
///
/// All edits are validated before any is applied: a range outside the text,
/// a range splitting a UTF-8 sequence, two overlapping ranges, or two edits
/// anchored at the same offset reject the whole batch.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditConflict> {
    for edit in edits {
        let Range { start, end } = edit.range;
        if start > end
            || end > source.len()
            || !source.is_char_boundary(start)
            || !source.is_char_boundary(end)
        {
            return Err(EditConflict::OutOfBounds {
                range: edit.range.clone(),
            });
        }
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.range.start, e.range.end));
    for pair in ordered.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.range.end > b.range.start || a.range.start == b.range.start {
            return Err(EditConflict::Overlap {
                first: a.range.clone(),
                second: b.range.clone(),
            });
        }
    }

    let mut out = source.to_string();
    for edit in ordered.into_iter().rev() {
        out.replace_range(edit.range.clone(), &edit.replacement);
    }
    Ok(out)
}

/// Wrap an already-escaped docstring body in `"""` delimiters.
///
/// Continuation lines are indented with `indent`; blank lines stay empty and
/// a multi-line docstring closes on its own line.
pub fn render_docstring(body: &str, indent: &str, newline: &str) -> String {
    let lines: Vec<&str> = body.lines().collect();
    if lines.len() <= 1 {
        return format!("\"\"\"{}\"\"\"", body.trim());
    }
    let mut out = String::from("\"\"\"");
    out.push_str(lines[0].trim_end());
    for line in &lines[1..] {
        out.push_str(newline);
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
    }
    out.push_str(newline);
    out.push_str(indent);
    out.push_str("\"\"\"");
    out
}

/// The edit that gives `entity` the docstring `body`: a replacement of the
/// existing literal when there is one, otherwise an insertion at the start
/// of the body.
pub fn docstring_edit(
    source: &str,
    entity: &DocumentableEntity,
    body: &str,
    newline: LineEnding,
) -> Edit {
    let nl = newline.as_str();
    let literal = render_docstring(body, &entity.indent_level, nl);

    if let Some(existing) = &entity.existing_docstring {
        return Edit::replace(existing.span.byte_range(), literal);
    }

    let at = entity.header_end.offset;
    if entity.body_inline {
        // `def f(): pass` becomes a block: the docstring and the old inline
        // statement each get their own line.
        let gap = inline_gap(&source[at..]);
        let indent = &entity.indent_level;
        return Edit::replace(at..at + gap, format!("{nl}{indent}{literal}{nl}{indent}"));
    }

    let head = source[..at].trim_start_matches('\u{feff}');
    let lead = if !head.is_empty() && !head.ends_with('\n') {
        nl
    } else {
        ""
    };
    Edit::insert(at, format!("{lead}{}{literal}{nl}", entity.indent_level))
}

/// Length of the blanks and backslash continuations before an inline body.
fn inline_gap(rest: &str) -> usize {
    let mut gap = 0;
    loop {
        let tail = &rest[gap..];
        if tail.starts_with(|c: char| c == ' ' || c == '\t') {
            gap += 1;
        } else if tail.starts_with("\\\n") {
            gap += 2;
        } else if tail.starts_with("\\\r\n") {
            gap += 3;
        } else {
            return gap;
        }
    }
}
