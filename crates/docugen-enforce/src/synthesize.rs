//! Signature-driven docstring synthesis.
//!
//! Everything here is a pure function of the entity metadata and the style:
//! the body of the callable is never inspected beyond the raises and
//! generator hints the builder already captured.

use docugen_core::types::{DocstringStyle, DocumentableEntity, EntityKind, Parameter};
use docugen_parsers::python::DEFAULT_MODULE_NAME;

use crate::styles::{markers, Section};

/// Summary phrases for dunder methods whose names read poorly as words.
const DUNDER_SUMMARIES: &[(&str, &str)] = &[
    ("__init__", "Initialize the instance."),
    ("__new__", "Create a new instance."),
    ("__post_init__", "Finish initializing the instance."),
    ("__call__", "Call the instance."),
    ("__repr__", "Return the developer representation."),
    ("__str__", "Return the string representation."),
    ("__len__", "Return the number of items."),
    ("__iter__", "Iterate over the items."),
    ("__next__", "Return the next item."),
    ("__contains__", "Check whether an item is contained."),
    ("__getitem__", "Return the item for a key."),
    ("__setitem__", "Set the item for a key."),
    ("__delitem__", "Delete the item for a key."),
    ("__enter__", "Enter the runtime context."),
    ("__exit__", "Exit the runtime context."),
    ("__aenter__", "Enter the asynchronous runtime context."),
    ("__aexit__", "Exit the asynchronous runtime context."),
    ("__eq__", "Compare for equality."),
    ("__hash__", "Return the hash value."),
    ("__bool__", "Return the truth value."),
];

/// Generic container annotations whose first type argument is the yielded type.
const ITERATOR_TYPES: &[&str] = &[
    "Iterator",
    "Generator",
    "Iterable",
    "AsyncIterator",
    "AsyncGenerator",
    "AsyncIterable",
];

/// Docstring body for `entity` in `style`, without quote delimiters or
/// indentation. Lines are joined with `\n`; the injector re-indents them.
pub fn synthesize(entity: &DocumentableEntity, style: DocstringStyle) -> String {
    let mut blocks: Vec<Vec<String>> = vec![vec![summary_line(entity)]];

    if entity.is_generator {
        blocks.push(vec![
            "This generator yields values rather than returning a single result.".to_string(),
        ]);
    }

    let sections = match style {
        DocstringStyle::Google => google_sections(entity),
        DocstringStyle::Numpy => numpy_sections(entity),
        DocstringStyle::Rest => rest_sections(entity),
    };
    blocks.extend(sections);

    let text = blocks
        .into_iter()
        .map(|block| block.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    escape_docstring_text(&text)
}

/// The one-sentence summary for an entity.
pub fn summary_line(entity: &DocumentableEntity) -> String {
    if entity.kind == EntityKind::Module {
        let words = words_of(entity.name.rsplit('.').next().unwrap_or_default());
        if entity.name == DEFAULT_MODULE_NAME || words.is_empty() {
            return "Python module.".to_string();
        }
        return sentence(&format!("{words} module"));
    }
    if let Some((_, summary)) = DUNDER_SUMMARIES.iter().find(|(n, _)| *n == entity.name) {
        return summary.to_string();
    }
    let phrase = name_to_phrase(&entity.name);
    if phrase.is_empty() {
        sentence(noun(entity))
    } else {
        sentence(&phrase)
    }
}

/// `parse_json_file` -> "Parse json file", `HTTPServer` -> "HTTP server".
pub fn name_to_phrase(name: &str) -> String {
    capitalize(&words_of(name))
}

/// Lower-case words of an identifier; all-caps acronyms keep their case.
fn words_of(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for part in name.split(|c: char| !c.is_alphanumeric()).filter(|p| !p.is_empty()) {
        let chars: Vec<char> = part.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());
            let boundary = cur.is_uppercase()
                && (prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower));
            if boundary {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        words.push(chars[start..].iter().collect());
    }
    words
        .into_iter()
        .map(|w| {
            let is_acronym = w.chars().count() > 1 && !w.chars().any(char::is_lowercase);
            if is_acronym {
                w
            } else {
                w.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sentence(phrase: &str) -> String {
    let phrase = capitalize(phrase.trim());
    if phrase.ends_with(['.', '!', '?']) {
        phrase
    } else {
        format!("{phrase}.")
    }
}

fn noun(entity: &DocumentableEntity) -> &'static str {
    match entity.kind {
        EntityKind::Module => "module",
        EntityKind::Class => "class",
        EntityKind::Method => "method",
        EntityKind::GeneratorFunction => "generator",
        EntityKind::Function | EntityKind::AsyncFunction => "function",
    }
}

/// Escape text so it can sit between `"""` delimiters unchanged in meaning.
pub fn escape_docstring_text(text: &str) -> String {
    let mut out = text
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"");
    if out.ends_with('"') {
        let backslashes = out[..out.len() - 1]
            .chars()
            .rev()
            .take_while(|c| *c == '\\')
            .count();
        if backslashes % 2 == 0 {
            out.pop();
            out.push_str("\\\"");
        }
    }
    out
}

fn param_description(param: &Parameter) -> String {
    let mut desc = if param.is_variadic {
        "Variable positional arguments.".to_string()
    } else if param.is_keyword_variadic {
        "Variable keyword arguments.".to_string()
    } else {
        format!("The {} argument.", words_of(&param.name))
    };
    if let Some(default) = &param.default_value_repr {
        desc.push_str(&format!(" Defaults to {}.", collapse_whitespace(default)));
    }
    desc
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The type documented for the return value: absent for generators and for
/// annotations that denote no value.
fn return_type(entity: &DocumentableEntity) -> Option<&str> {
    if entity.is_generator || !entity.returns_value() {
        return None;
    }
    entity.return_annotation.as_deref().map(str::trim)
}

/// First type argument of an iterator-like return annotation.
pub fn yield_type(annotation: &str) -> Option<String> {
    let annotation = annotation.trim();
    let open = annotation.find('[')?;
    let close = annotation.rfind(']')?;
    if close <= open {
        return None;
    }
    let base = annotation[..open].rsplit('.').next().unwrap_or_default();
    if !ITERATOR_TYPES.contains(&base) {
        return None;
    }
    let inner = &annotation[open + 1..close];
    let mut depth = 0usize;
    let mut end = inner.len();
    for (i, c) in inner.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    let first = inner[..end].trim();
    (!first.is_empty()).then(|| first.to_string())
}

fn generator_yield_type(entity: &DocumentableEntity) -> Option<String> {
    if !entity.is_generator {
        return None;
    }
    entity.return_annotation.as_deref().and_then(yield_type)
}

const YIELDS_DESCRIPTION: &str = "Values produced by the generator.";
const RETURNS_DESCRIPTION: &str = "The return value.";

fn google_sections(entity: &DocumentableEntity) -> Vec<Vec<String>> {
    let m = markers(DocstringStyle::Google);
    let mut blocks = Vec::new();

    let params = entity.documented_parameters();
    if !params.is_empty() && entity.kind.is_callable() {
        let mut block = vec![m.heading(Section::Params).to_string()];
        for p in params {
            let label = match (&p.type_annotation, &p.default_value_repr) {
                (Some(ty), Some(_)) => format!("{} ({ty}, optional)", p.display_name()),
                (Some(ty), None) => format!("{} ({ty})", p.display_name()),
                (None, _) => p.display_name(),
            };
            block.push(format!("    {label}: {}", param_description(p)));
        }
        blocks.push(block);
    }

    if let Some(ty) = return_type(entity) {
        blocks.push(vec![
            m.heading(Section::Returns).to_string(),
            format!("    {ty}: {RETURNS_DESCRIPTION}"),
        ]);
    }

    if entity.is_generator {
        let line = match generator_yield_type(entity) {
            Some(ty) => format!("    {ty}: {YIELDS_DESCRIPTION}"),
            None => format!("    {YIELDS_DESCRIPTION}"),
        };
        blocks.push(vec![m.heading(Section::Yields).to_string(), line]);
    }

    if !entity.raises_hints.is_empty() {
        let mut block = vec![m.heading(Section::Raises).to_string()];
        for exc in &entity.raises_hints {
            block.push(format!("    {exc}: Raised by this {}.", noun(entity)));
        }
        blocks.push(block);
    }

    if entity.kind == EntityKind::Class && !entity.attributes.is_empty() {
        let mut block = vec![m.heading(Section::Attributes).to_string()];
        for attr in &entity.attributes {
            let label = match &attr.type_annotation {
                Some(ty) => format!("{} ({ty})", attr.name),
                None => attr.name.clone(),
            };
            block.push(format!("    {label}: The {} attribute.", words_of(&attr.name)));
        }
        blocks.push(block);
    }

    blocks
}

fn numpy_heading(heading: &str) -> Vec<String> {
    vec![heading.to_string(), "-".repeat(heading.chars().count())]
}

fn numpy_sections(entity: &DocumentableEntity) -> Vec<Vec<String>> {
    let m = markers(DocstringStyle::Numpy);
    let mut blocks = Vec::new();

    let params = entity.documented_parameters();
    if !params.is_empty() && entity.kind.is_callable() {
        let mut block = numpy_heading(m.heading(Section::Params));
        for p in params {
            let label = match (&p.type_annotation, &p.default_value_repr) {
                (Some(ty), Some(_)) => format!("{} : {ty}, optional", p.display_name()),
                (Some(ty), None) => format!("{} : {ty}", p.display_name()),
                (None, Some(_)) => format!("{} : optional", p.display_name()),
                (None, None) => p.display_name(),
            };
            block.push(label);
            block.push(format!("    {}", param_description(p)));
        }
        blocks.push(block);
    }

    if let Some(ty) = return_type(entity) {
        let mut block = numpy_heading(m.heading(Section::Returns));
        block.push(ty.to_string());
        block.push(format!("    {RETURNS_DESCRIPTION}"));
        blocks.push(block);
    }

    if entity.is_generator {
        let mut block = numpy_heading(m.heading(Section::Yields));
        match generator_yield_type(entity) {
            Some(ty) => {
                block.push(ty);
                block.push(format!("    {YIELDS_DESCRIPTION}"));
            }
            None => block.push(YIELDS_DESCRIPTION.to_string()),
        }
        blocks.push(block);
    }

    if !entity.raises_hints.is_empty() {
        let mut block = numpy_heading(m.heading(Section::Raises));
        for exc in &entity.raises_hints {
            block.push(exc.clone());
            block.push(format!("    Raised by this {}.", noun(entity)));
        }
        blocks.push(block);
    }

    if entity.kind == EntityKind::Class && !entity.attributes.is_empty() {
        let mut block = numpy_heading(m.heading(Section::Attributes));
        for attr in &entity.attributes {
            match &attr.type_annotation {
                Some(ty) => block.push(format!("{} : {ty}", attr.name)),
                None => block.push(attr.name.clone()),
            }
            block.push(format!("    The {} attribute.", words_of(&attr.name)));
        }
        blocks.push(block);
    }

    blocks
}

/// reST renders every section as one field list.
fn rest_sections(entity: &DocumentableEntity) -> Vec<Vec<String>> {
    let m = markers(DocstringStyle::Rest);
    let mut fields = Vec::new();

    if entity.kind.is_callable() {
        for p in entity.documented_parameters() {
            fields.push(format!(
                "{} {}: {}",
                m.heading(Section::Params),
                p.name,
                param_description(p)
            ));
            if let Some(ty) = &p.type_annotation {
                fields.push(format!(":type {}: {ty}", p.name));
            }
        }
    }

    if let Some(ty) = return_type(entity) {
        fields.push(format!("{} {RETURNS_DESCRIPTION}", m.heading(Section::Returns)));
        fields.push(format!(":rtype: {ty}"));
    }

    if entity.is_generator {
        let text = match generator_yield_type(entity) {
            Some(ty) => format!("Values of type {ty} produced by the generator."),
            None => YIELDS_DESCRIPTION.to_string(),
        };
        fields.push(format!("{} {text}", m.heading(Section::Yields)));
    }

    for exc in &entity.raises_hints {
        fields.push(format!(
            "{} {exc}: Raised by this {}.",
            m.heading(Section::Raises),
            noun(entity)
        ));
    }

    if entity.kind == EntityKind::Class {
        for attr in &entity.attributes {
            fields.push(format!(
                "{} {}: The {} attribute.",
                m.heading(Section::Attributes),
                attr.name,
                words_of(&attr.name)
            ));
            if let Some(ty) = &attr.type_annotation {
                fields.push(format!(":vartype {}: {ty}", attr.name));
            }
        }
    }

    if fields.is_empty() {
        vec![]
    } else {
        vec![fields]
    }
}
