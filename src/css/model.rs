//! Stylesheet AST: StyleSheet, AtRule, RuleSet, Selector, Property.
//!
//! Values are kept as raw tokens; interpreting them is up to the style
//! resolution code that consumes the [`StyleSheet`].

use std::fmt;

use crate::css::token::{Token, TokenKind};

/// How an attribute selector compares the attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatcher {
    /// `[attr]`: the attribute is present.
    Exists,
    /// `[attr=value]`
    Exact,
    /// `[attr~=value]`: whitespace-separated list contains the value.
    Include,
    /// `[attr|=value]`: equals the value or starts with `value-`.
    Dash,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

impl AttrMatcher {
    /// The operator as written in source; empty for [`AttrMatcher::Exists`].
    pub fn as_str(self) -> &'static str {
        match self {
            AttrMatcher::Exists => "",
            AttrMatcher::Exact => "=",
            AttrMatcher::Include => "~=",
            AttrMatcher::Dash => "|=",
            AttrMatcher::Prefix => "^=",
            AttrMatcher::Suffix => "$=",
            AttrMatcher::Substring => "*=",
        }
    }
}

/// A single simple selector within a compound selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorEntry {
    /// `*`
    Universal,
    /// Element selector: matches the widget type name (e.g. `Button`).
    Element(String),
    /// `.class`
    Class(String),
    /// `#id`
    Id(String),
    /// `:hover`. A negated `:not(hovered)` is stored as `"!hovered"`.
    PseudoClass(String),
    /// `::before`
    PseudoElement(String),
    /// `[name]`, `[name=value]`, `[name*=value]`, ...
    Attribute {
        name: String,
        matcher: AttrMatcher,
        value: String,
    },
}

impl fmt::Display for SelectorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorEntry::Universal => f.write_str("*"),
            SelectorEntry::Element(name) => f.write_str(name),
            SelectorEntry::Class(name) => write!(f, ".{name}"),
            SelectorEntry::Id(name) => write!(f, "#{name}"),
            SelectorEntry::PseudoClass(name) => match name.strip_prefix('!') {
                Some(negated) => write!(f, ":not({negated})"),
                None => write!(f, ":{name}"),
            },
            SelectorEntry::PseudoElement(name) => write!(f, "::{name}"),
            SelectorEntry::Attribute {
                name,
                matcher: AttrMatcher::Exists,
                ..
            } => write!(f, "[{name}]"),
            SelectorEntry::Attribute {
                name,
                matcher,
                value,
            } => write!(f, "[{name}{}\"{value}\"]", matcher.as_str()),
        }
    }
}

/// A compound selector: entries in source order, no combinators.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub entries: Vec<SelectorEntry>,
    /// Line the selector starts on.
    pub line: u32,
}

impl Selector {
    pub fn new(line: u32) -> Self {
        Self {
            entries: Vec::new(),
            line,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// A `name: value` declaration. The value is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Vec<Token>,
}

impl Property {
    pub fn new(name: impl Into<String>, value: Vec<Token>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Value token kinds, ignoring line numbers.
    pub fn value_kinds(&self) -> impl Iterator<Item = &TokenKind> {
        self.value.iter().map(|token| &token.kind)
    }
}

/// An `@keyword` directive: either raw content ended by `;`, or a
/// declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Keyword without the leading `@`.
    pub keyword: String,
    pub content: Vec<Token>,
    pub properties: Vec<Property>,
}

impl AtRule {
    /// ASCII case-insensitive keyword comparison.
    pub fn is_named(&self, keyword: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(keyword)
    }
}

/// One or more selectors sharing one declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// Comma-separated selectors, in source order.
    pub selectors: Vec<Selector>,
    pub properties: Vec<Property>,
}

impl RuleSet {
    /// The last property named `name`; later declarations override earlier.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().rev().find(|p| p.name == name)
    }
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub at_rules: Vec<AtRule>,
    pub rulesets: Vec<RuleSet>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.at_rules.is_empty() && self.rulesets.is_empty()
    }

    /// At-rules with the given keyword, in source order.
    pub fn at_rules_named<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a AtRule> {
        self.at_rules.iter().filter(move |rule| rule.is_named(keyword))
    }

    /// Targets of `@import` rules: the first content token, when it is a url
    /// or a string.
    pub fn import_urls(&self) -> impl Iterator<Item = &str> {
        self.at_rules_named("import")
            .filter_map(|rule| match rule.content.first().map(|t| &t.kind) {
                Some(TokenKind::Url(url) | TokenKind::Str(url)) => Some(url.as_str()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind) -> Token {
        Token::new(kind, 1)
    }

    fn at_rule(keyword: &str, content: Vec<Token>) -> AtRule {
        AtRule {
            keyword: keyword.into(),
            content,
            properties: Vec::new(),
        }
    }

    #[test]
    fn test_selector_display() {
        let sel = Selector {
            entries: vec![
                SelectorEntry::Element("tag".into()),
                SelectorEntry::Class("class".into()),
                SelectorEntry::Id("id".into()),
                SelectorEntry::Attribute {
                    name: "attr".into(),
                    matcher: AttrMatcher::Substring,
                    value: "text".into(),
                },
                SelectorEntry::PseudoClass("!hovered".into()),
                SelectorEntry::PseudoElement("first-line".into()),
            ],
            line: 1,
        };
        assert_eq!(
            sel.to_string(),
            "tag.class#id[attr*=\"text\"]:not(hovered)::first-line"
        );
    }

    #[test]
    fn test_attribute_exists_display() {
        let entry = SelectorEntry::Attribute {
            name: "checked".into(),
            matcher: AttrMatcher::Exists,
            value: String::new(),
        };
        assert_eq!(entry.to_string(), "[checked]");
    }

    #[test]
    fn test_ruleset_property_last_wins() {
        let rule = RuleSet {
            selectors: Vec::new(),
            properties: vec![
                Property::new("color", vec![token(TokenKind::Ident("red".into()))]),
                Property::new("margin", vec![token(TokenKind::Ident("auto".into()))]),
                Property::new("color", vec![token(TokenKind::Ident("blue".into()))]),
            ],
        };
        let color = rule.property("color").map(|p| p.value[0].text());
        assert_eq!(color, Some("blue"));
        assert!(rule.property("padding").is_none());
    }

    #[test]
    fn test_stylesheet_import_urls() {
        let sheet = StyleSheet {
            at_rules: vec![
                at_rule("import", vec![token(TokenKind::Url("a.css".into()))]),
                at_rule("IMPORT", vec![token(TokenKind::Str("b.css".into()))]),
                at_rule("import", vec![token(TokenKind::Ident("c".into()))]),
                at_rule("define-drawable", vec![token(TokenKind::Ident("d".into()))]),
            ],
            rulesets: Vec::new(),
        };
        let urls: Vec<_> = sheet.import_urls().collect();
        assert_eq!(urls, vec!["a.css", "b.css"]);
        assert_eq!(sheet.at_rules_named("define-drawable").count(), 1);
        assert!(!sheet.is_empty());
    }

    #[test]
    fn test_stylesheet_default() {
        let sheet = StyleSheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet, StyleSheet::default());
    }
}
