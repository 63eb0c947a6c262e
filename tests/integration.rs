//! Integration tests for toolkit-css.
//!
//! These tests exercise the public API from outside the crate, verifying that
//! the tokenizer, token stream and parser work together on whole stylesheets.

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use toolkit_css::testing::stylesheet_to_string;
use toolkit_css::*;

const THEME: &str = "\
@import url('secondary.css');
@define-colors { fg-color: #fff000; }
tag.class#id[attr*='text'], second * { color: #fff; }
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn parse_collecting(input: &str) -> (StyleSheet, Vec<Diagnostic>) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let sheet = parse_css_with(input, &ParserConfig::default(), &mut diagnostics);
    (sheet, diagnostics)
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn test_theme_structure() {
    init_tracing();
    let (sheet, diagnostics) = parse_collecting(THEME);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    assert_eq!(sheet.at_rules.len(), 2);
    assert_eq!(sheet.at_rules[0].keyword, "import");
    assert_eq!(
        sheet.at_rules[0].content[0].kind,
        TokenKind::Url("secondary.css".into())
    );

    assert_eq!(sheet.at_rules[1].keyword, "define-colors");
    let fg = &sheet.at_rules[1].properties[0];
    assert_eq!(fg.name, "fg-color");
    assert_eq!(fg.value.len(), 1);
    assert_eq!(fg.value[0].text(), "fff000");
    assert!(matches!(fg.value[0].kind, TokenKind::Hash { .. }));

    assert_eq!(sheet.rulesets.len(), 1);
    let rule = &sheet.rulesets[0];
    assert_eq!(
        rule.selectors[0].entries,
        vec![
            SelectorEntry::Element("tag".into()),
            SelectorEntry::Class("class".into()),
            SelectorEntry::Id("id".into()),
            SelectorEntry::Attribute {
                name: "attr".into(),
                matcher: AttrMatcher::Substring,
                value: "text".into(),
            },
        ]
    );
    assert_eq!(
        rule.selectors[1].entries,
        vec![SelectorEntry::Element("second".into()), SelectorEntry::Universal]
    );
    assert_eq!(rule.selectors[0].line, 3);
}

#[test]
fn test_theme_snapshot() {
    let sheet = parse_css(THEME);
    assert_snapshot!(stylesheet_to_string(&sheet), @r#"
    @import url(secondary.css)
    @define-colors {
      fg-color: #fff000
    }
    tag.class#id[attr*="text"], second* {
      color: #fff
    }
    "#);
}

#[test]
fn test_import_urls() {
    let sheet = parse_css("@import url(a.css); @import 'b.css'; @import;");
    let urls: Vec<_> = sheet.import_urls().collect();
    assert_eq!(urls, vec!["a.css", "b.css"]);
}

// ---------------------------------------------------------------------------
// Error recovery
// ---------------------------------------------------------------------------

#[test]
fn test_errors_stay_local() {
    init_tracing();
    let input = "\
Button { 'malformed': block; color: red; }
Label[a 1], Label.ok { width: ; height: 3; }
@empty;
Panel:not(1) { margin: 1 }
";
    let (sheet, diagnostics) = parse_collecting(input);

    assert_snapshot!(stylesheet_to_string(&sheet), @r"
    Button {
      color: red
    }
    Label, Label.ok {
      height: 3
    }
    Panel {
      margin: 1
    }
    ");

    let lines: Vec<u32> = diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 1, 1, 2, 2, 4]);
    assert_eq!(
        diagnostics[3].error,
        ParseError::UnexpectedTokenInAttribute("1".into())
    );
    assert_eq!(
        diagnostics[4].error,
        ParseError::EmptyDeclaration("width".into())
    );
    assert_eq!(diagnostics[5].error, ParseError::MalformedNot);
}

#[test]
fn test_bad_string_in_value() {
    let (sheet, _) = parse_collecting("a { content: 'broken\n; color: red; }");
    let rule = &sheet.rulesets[0];
    assert_eq!(
        rule.properties[0].value[0].kind,
        TokenKind::BadStr("broken".into())
    );
    assert_eq!(rule.property("color").map(|p| p.value[0].text()), Some("red"));
}

#[test]
fn test_truncated_input_never_panics() {
    let cut = THEME.len() / 2;
    for end in 0..=cut {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        parse_css_with(&THEME[..end], &ParserConfig::default(), &mut diagnostics);
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[test]
fn test_tokenize_public_api() {
    let tokens = tokenize("U+140? url(bad url) 1.5e3%");
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::UnicodeRange(0x1400, 0x140F),
            TokenKind::BadUrl,
            TokenKind::Percentage {
                repr: "1.5e3".into(),
                is_integer: false
            },
        ]
    );
}

#[test]
fn test_token_range_matches_tokenize() {
    let input = "a { b: c }";
    let mut range = Tokenizer::new(input).into_range();
    let mut pulled = Vec::new();
    while !range.is_empty() {
        pulled.push(range.front().clone());
        range.pop_front();
    }
    assert_eq!(pulled, tokenize(input));
}
