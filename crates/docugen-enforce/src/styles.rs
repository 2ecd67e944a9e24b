//! Per-style section markers shared by the synthesizer and the rule engine.

use docugen_core::types::DocstringStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Params,
    Returns,
    Yields,
    Raises,
    Attributes,
}

/// Section headings for one style. The first entry of each list is the one
/// the synthesizer emits; the rest are accepted spellings.
pub struct Markers {
    pub params: &'static [&'static str],
    pub returns: &'static [&'static str],
    pub yields: &'static [&'static str],
    pub raises: &'static [&'static str],
    pub attributes: &'static [&'static str],
}

impl Markers {
    pub fn get(&self, section: Section) -> &'static [&'static str] {
        match section {
            Section::Params => self.params,
            Section::Returns => self.returns,
            Section::Yields => self.yields,
            Section::Raises => self.raises,
            Section::Attributes => self.attributes,
        }
    }

    pub fn heading(&self, section: Section) -> &'static str {
        self.get(section)[0]
    }
}

const GOOGLE: Markers = Markers {
    params: &["Args:", "Arguments:", "Parameters:"],
    returns: &["Returns:", "Return:"],
    yields: &["Yields:", "Yield:"],
    raises: &["Raises:"],
    attributes: &["Attributes:"],
};

const NUMPY: Markers = Markers {
    params: &["Parameters", "Other Parameters"],
    returns: &["Returns"],
    yields: &["Yields"],
    raises: &["Raises"],
    attributes: &["Attributes"],
};

const REST: Markers = Markers {
    params: &[":param"],
    returns: &[":returns:", ":return:", ":rtype:"],
    yields: &[":yields:", ":yield:"],
    raises: &[":raises", ":raise"],
    attributes: &[":ivar"],
};

pub fn markers(style: DocstringStyle) -> &'static Markers {
    match style {
        DocstringStyle::Google => &GOOGLE,
        DocstringStyle::Numpy => &NUMPY,
        DocstringStyle::Rest => &REST,
    }
}

/// Whether `body` contains `section` written in `style`.
pub fn style_has_section(style: DocstringStyle, body: &str, section: Section) -> bool {
    let headings = markers(style).get(section);
    let lines: Vec<&str> = body.lines().map(str::trim).collect();
    match style {
        DocstringStyle::Google => lines.iter().any(|l| headings.contains(l)),
        DocstringStyle::Numpy => lines
            .windows(2)
            .any(|w| headings.contains(&w[0]) && is_underline(w[1])),
        DocstringStyle::Rest => lines
            .iter()
            .any(|l| headings.iter().any(|h| l.starts_with(h))),
    }
}

/// Whether `body` contains `section` in any supported style.
pub fn has_section(body: &str, section: Section) -> bool {
    DocstringStyle::ALL
        .iter()
        .any(|style| style_has_section(*style, body, section))
}

fn is_underline(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '-')
}
