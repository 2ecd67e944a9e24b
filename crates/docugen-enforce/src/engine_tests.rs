use super::*;
use docugen_core::types::EntityKind;

const MIXED: &str = r#"import os


class Repository:
    backend: str = "sqlite"

    def __init__(self, path: str, *, timeout: float = 5.0):
        self.path = path

    @property
    def name(self) -> str:
        return os.path.basename(self.path)

    def rows(self, limit: int):
        for i in range(limit):
            yield i

    async def fetch(self, key, **options) -> bytes:
        if not key:
            raise KeyError(key)
        return b""


def build(path, retries=3):
    """Build a repository.

    Args:
        path: Where it lives.
        retries: How often to retry.
    """
    def retry():
        pass
    return Repository(path)


class Empty: pass
"#;

fn fill_gaps(style: DocstringStyle) -> DocEngine {
    DocEngine::new(style, InstrumentMode::FillGaps)
}

#[test]
fn test_instrument_function_google() {
    let source = "def add(a: int, b: int) -> int:\n    return a + b\n";
    let out = instrument(source, DocstringStyle::Google, InstrumentMode::FillGaps).unwrap();
    let expected = r#""""Python module."""
def add(a: int, b: int) -> int:
    """Add.

    Args:
        a (int): The a argument.
        b (int): The b argument.

    Returns:
        int: The return value.
    """
    return a + b
"#;
    assert_eq!(out.text, expected);
    assert_eq!(out.edit_count, 2);
}

#[test]
fn test_instrument_uses_module_name() {
    let engine = DocEngine::default().with_module_name("data_utils");
    let out = engine.instrument("x = 1\n").unwrap();
    assert_eq!(out.text, "\"\"\"Data utils module.\"\"\"\nx = 1\n");
    assert_eq!(engine.analyze("x = 1\n").unwrap().module, "data_utils");
}

#[test]
fn test_inline_body_becomes_block() {
    let out = fill_gaps(DocstringStyle::Google)
        .instrument("class Empty: pass\n")
        .unwrap();
    assert_eq!(
        out.text,
        "\"\"\"Python module.\"\"\"\nclass Empty:\n    \"\"\"Empty.\"\"\"\n    pass\n"
    );
}

#[test]
fn test_crlf_is_preserved() {
    let out = fill_gaps(DocstringStyle::Google)
        .instrument("def f():\r\n    return 1\r\n")
        .unwrap();
    assert_eq!(
        out.text,
        "\"\"\"Python module.\"\"\"\r\ndef f():\r\n    \"\"\"F.\"\"\"\r\n    return 1\r\n"
    );
}

#[test]
fn test_tab_indentation_is_matched() {
    let source = "class A:\n\tdef f(self):\n\t\treturn 1\n";
    let out = fill_gaps(DocstringStyle::Google).instrument(source).unwrap();
    assert!(out.text.contains("class A:\n\t\"\"\"A.\"\"\"\n\tdef f(self):\n\t\t\"\"\"F.\"\"\"\n"));
}

#[test]
fn test_already_documented_source_is_untouched() {
    let source = r#""""Utilities."""


def ping():
    """Ping the server."""
    return None
"#;
    for style in DocstringStyle::ALL {
        let out = fill_gaps(style).instrument(source).unwrap();
        assert_eq!(out.edit_count, 0);
        assert_eq!(out.text, source);
    }
}

#[test]
fn test_replace_all_rewrites_existing() {
    let source = "def f():\n    'old'\n";
    let out = instrument(source, DocstringStyle::Google, InstrumentMode::ReplaceAll).unwrap();
    assert_eq!(out.text, "\"\"\"Python module.\"\"\"\ndef f():\n    \"\"\"F.\"\"\"\n");
    assert_eq!(out.edit_count, 2);
}

#[test]
fn test_replace_all_keeps_trailing_comment() {
    let source = "\"\"\"Doc.\"\"\"\ndef f():\n    \"x\"  # note\n    return 1\n";
    let out = instrument(source, DocstringStyle::Rest, InstrumentMode::ReplaceAll).unwrap();
    assert!(out.text.contains("    \"\"\"F.\"\"\"  # note\n"));
    assert!(out.text.starts_with("\"\"\"Python module.\"\"\"\n"));
}

#[test]
fn test_empty_source() {
    let report = analyze("").unwrap();
    assert_eq!(report.total_entities, 1);
    assert_eq!(report.coverage_percentage, 100.0);

    let out = instrument("", DocstringStyle::Google, InstrumentMode::FillGaps).unwrap();
    assert_eq!(out.text, "");
    assert_eq!(out.edit_count, 0);
}

#[test]
fn test_syntax_error_is_not_a_report() {
    assert!(matches!(analyze("def f(:"), Err(ParseError::Syntax { .. })));
    assert!(matches!(
        instrument("def f(:", DocstringStyle::Google, InstrumentMode::FillGaps),
        Err(InstrumentError::Parse(_))
    ));
}

#[test]
fn test_fill_gaps_is_idempotent() {
    for style in DocstringStyle::ALL {
        let engine = fill_gaps(style);
        let once = engine.instrument(MIXED).unwrap();
        let twice = engine.instrument(&once.text).unwrap();
        assert_eq!(twice.edit_count, 0, "{style}");
        assert_eq!(twice.text, once.text, "{style}");
    }
}

#[test]
fn test_instrumented_text_reparses() {
    for style in DocstringStyle::ALL {
        for mode in [InstrumentMode::FillGaps, InstrumentMode::ReplaceAll] {
            let out = instrument(MIXED, style, mode).unwrap();
            assert!(analyze(&out.text).is_ok(), "{style} {mode}:\n{}", out.text);
        }
    }
}

#[test]
fn test_coverage_rises_and_entities_stay() {
    let before = analyze(MIXED).unwrap();
    assert_eq!(before.total_entities, 9);
    assert_eq!(before.documented_entities, 1);

    for style in DocstringStyle::ALL {
        let out = fill_gaps(style).instrument(MIXED).unwrap();
        assert_eq!(out.edit_count, 8);
        let after = analyze(&out.text).unwrap();
        assert_eq!(after.total_entities, before.total_entities);
        assert_eq!(after.coverage_percentage, 100.0);
        assert!(after.coverage_percentage > before.coverage_percentage);
    }
}

#[test]
fn test_synthesized_docstrings_comply() {
    for style in DocstringStyle::ALL {
        let out = instrument(MIXED, style, InstrumentMode::ReplaceAll).unwrap();
        let report = analyze(&out.text).unwrap();
        assert_eq!(
            report.compliance_percentage, 100.0,
            "{style} violations: {:?}",
            report.violations
        );
    }
}

#[test]
fn test_nested_decorated_method_is_instrumented() {
    let source = r#"
def factory():
    class Local:
        @staticmethod
        @cache(maxsize=3)
        def build(x):
            return x
    return Local
"#;
    let engine = fill_gaps(DocstringStyle::Numpy);
    let entities = engine.entities(source).unwrap();
    let build = entities
        .iter()
        .find(|e| e.qualified_path == "factory.Local.build")
        .unwrap();
    assert_eq!(build.kind, EntityKind::Method);
    assert_eq!(build.parent_kind, Some(EntityKind::Class));

    let out = engine.instrument(source).unwrap();
    assert!(out.text.contains(
        "        def build(x):\n            \"\"\"Build.\n\n            Parameters\n            ----------\n            x\n                The x argument.\n            \"\"\"\n"
    ));
}

#[test]
fn test_docstring_with_quotes_survives() {
    let source = "def f(sep='\"\"\"', end='\"'):\n    pass\n";
    for style in DocstringStyle::ALL {
        let out = instrument(source, style, InstrumentMode::FillGaps).unwrap();
        let report = analyze(&out.text).unwrap();
        assert_eq!(report.total_entities, 2);
        assert_eq!(report.coverage_percentage, 100.0);
    }
}

#[test]
fn test_plan_skips_documented_in_fill_gaps() {
    let source = "\"\"\"Doc.\"\"\"\ndef a():\n    pass\ndef b():\n    \"\"\"B.\"\"\"\n";
    let engine = fill_gaps(DocstringStyle::Google);
    let entities = engine.entities(source).unwrap();
    let edits = engine.plan_edits(source, &entities);
    assert_eq!(edits.len(), 1);
    assert!(edits[0].is_insertion());
    assert_eq!(edits[0].range.start, source.find("    pass").unwrap());

    let replace = DocEngine::new(DocstringStyle::Google, InstrumentMode::ReplaceAll);
    assert_eq!(replace.plan_edits(source, &entities).len(), 3);
}

#[test]
fn test_byte_order_mark_stays_first() {
    let out = instrument("\u{feff}import os\n", DocstringStyle::Google, InstrumentMode::FillGaps)
        .unwrap();
    assert_eq!(out.text, "\u{feff}\"\"\"Python module.\"\"\"\nimport os\n");

    let commented = instrument(
        "\u{feff}# banner\nimport os\n",
        DocstringStyle::Google,
        InstrumentMode::FillGaps,
    )
    .unwrap();
    assert_eq!(commented.text, "\u{feff}# banner\n\"\"\"Python module.\"\"\"\nimport os\n");
}

#[test]
fn test_backslash_continued_header_becomes_block() {
    let source = "\"\"\"Doc.\"\"\"\ndef f(): \\\n    return 1\n";
    let out = fill_gaps(DocstringStyle::Google).instrument(source).unwrap();
    assert_eq!(
        out.text,
        "\"\"\"Doc.\"\"\"\ndef f():\n    \"\"\"F.\"\"\"\n    return 1\n"
    );
    let again = fill_gaps(DocstringStyle::Google).instrument(&out.text).unwrap();
    assert_eq!(again.edit_count, 0);
}

#[test]
fn test_parenthesized_docstring_counts() {
    let source = "\"\"\"M.\"\"\"\ndef f():\n    (\"Doc.\")\n";
    assert_eq!(analyze(source).unwrap().coverage_percentage, 100.0);

    let out = fill_gaps(DocstringStyle::Google).instrument(source).unwrap();
    assert_eq!(out.edit_count, 0);

    let replaced = instrument(source, DocstringStyle::Google, InstrumentMode::ReplaceAll).unwrap();
    assert_eq!(replaced.text, "\"\"\"Python module.\"\"\"\ndef f():\n    \"\"\"F.\"\"\"\n");
}
