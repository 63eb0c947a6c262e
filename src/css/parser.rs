//! Recursive descent stylesheet parser.
//!
//! Parses stylesheet text into a [`StyleSheet`] of at-rules and rule sets,
//! pulling tokens from a [`TokenRange`]. Parsing never fails: every problem
//! is reported to a [`DiagnosticSink`] and only the smallest enclosing
//! construct (one declaration, one selector entry, one rule) is dropped.

use crate::css::diagnostics::{Diagnostic, DiagnosticSink, ParseError, TracingSink};
use crate::css::model::*;
use crate::css::token::{Token, TokenKind};
use crate::css::token_range::TokenRange;
use crate::css::tokenizer::Tokenizer;

// ---------------------------------------------------------------------------
// ParserConfig
// ---------------------------------------------------------------------------

/// Configuration for a single parse.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Optional stylesheet name (file path, resource id) for log output.
    pub source: Option<String>,
    /// Number of the first source line, for stylesheets embedded in a larger
    /// document.
    pub first_line: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            source: None,
            first_line: 1,
        }
    }
}

impl ParserConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source name (builder).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the first line number (builder).
    pub fn with_first_line(mut self, first_line: u32) -> Self {
        self.first_line = first_line;
        self
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Parse stylesheet text, logging diagnostics through `tracing`.
pub fn parse_css(input: &str) -> StyleSheet {
    parse_css_with_config(input, &ParserConfig::default())
}

/// Parse with the given config, logging diagnostics through `tracing`.
pub fn parse_css_with_config(input: &str, config: &ParserConfig) -> StyleSheet {
    let mut sink = TracingSink::new(config.source.clone());
    parse_css_with(input, config, &mut sink)
}

/// Parse with the given config, reporting diagnostics to `sink`.
pub fn parse_css_with(
    input: &str,
    config: &ParserConfig,
    sink: &mut dyn DiagnosticSink,
) -> StyleSheet {
    let tokenizer = Tokenizer::with_first_line(input, config.first_line);
    let sheet = Parser::new(TokenRange::new(tokenizer), sink).parse_stylesheet();

    tracing::debug!(
        source = config.source.as_deref().unwrap_or("<inline>"),
        at_rules = sheet.at_rules.len(),
        rulesets = sheet.rulesets.len(),
        "parsed stylesheet"
    );
    sheet
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Recursive descent parser state: the token stream and the diagnostics sink.
pub struct Parser<'a> {
    tokens: TokenRange,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: TokenRange, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { tokens, sink }
    }

    /// Parse rules until the input is exhausted.
    pub fn parse_stylesheet(mut self) -> StyleSheet {
        let mut sheet = StyleSheet::new();

        while !self.tokens.is_empty() {
            if matches!(self.tokens.front().kind, TokenKind::AtKeyword(_)) {
                if let Some(rule) = self.consume_at_rule() {
                    sheet.at_rules.push(rule);
                }
            } else if let Some(rule) = self.consume_qualified_rule() {
                sheet.rulesets.push(rule);
            }
        }

        sheet
    }

    fn front_kind(&self) -> &TokenKind {
        &self.tokens.front().kind
    }

    fn report(&mut self, line: u32, error: ParseError) {
        self.sink.report(Diagnostic::new(line, error));
    }

    /// Report `error` against the front token without consuming it.
    fn report_here(&mut self, error: ParseError) {
        let line = self.tokens.front().line;
        self.report(line, error);
    }

    /// Take the front token if it is an identifier.
    fn take_ident(&mut self) -> Option<String> {
        match self.front_kind() {
            TokenKind::Ident(_) => match self.tokens.take_front().kind {
                TokenKind::Ident(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// `@keyword content... ;` or `@keyword { declarations }`.
    fn consume_at_rule(&mut self) -> Option<AtRule> {
        let TokenKind::AtKeyword(keyword) = self.tokens.take_front().kind else {
            return None;
        };
        let mut content = Vec::new();
        let mut properties = Vec::new();

        loop {
            match self.front_kind() {
                TokenKind::Semicolon => {
                    self.tokens.pop_front();
                    break;
                }
                TokenKind::OpenCurly => {
                    self.tokens.pop_front();
                    properties = self.consume_declaration_list();
                    break;
                }
                TokenKind::Eof => break,
                _ => content.push(self.tokens.take_front()),
            }
        }

        if content.is_empty() && properties.is_empty() {
            tracing::debug!(keyword = %keyword, "dropping empty at-rule");
            return None;
        }

        Some(AtRule {
            keyword,
            content,
            properties,
        })
    }

    /// Selector list followed by a declaration block.
    ///
    /// A block with no selector in front of it still yields a rule set, with
    /// an empty selector list.
    fn consume_qualified_rule(&mut self) -> Option<RuleSet> {
        let mut selectors = Vec::new();

        loop {
            match self.front_kind() {
                TokenKind::Eof => {
                    self.report_here(ParseError::UnexpectedEof);
                    return None;
                }
                TokenKind::OpenCurly => {
                    self.tokens.pop_front();
                    let properties = self.consume_declaration_list();
                    return Some(RuleSet {
                        selectors,
                        properties,
                    });
                }
                _ => {
                    if let Some(selector) = self.consume_selector() {
                        selectors.push(selector);
                    }
                }
            }
        }
    }

    /// One compound selector, ended by `,` (consumed), `{` or end of input.
    ///
    /// Returns `None` if no entry survived.
    fn consume_selector(&mut self) -> Option<Selector> {
        let mut selector = Selector::new(self.tokens.front().line);

        loop {
            if matches!(self.front_kind(), TokenKind::OpenCurly | TokenKind::Eof) {
                break;
            }

            let token = self.tokens.take_front();
            match token.kind {
                TokenKind::Comma => break,
                TokenKind::Delim('*') => selector.entries.push(SelectorEntry::Universal),
                TokenKind::Delim('.') => match self.take_ident() {
                    Some(name) => selector.entries.push(SelectorEntry::Class(name)),
                    None => {
                        let got = self.tokens.front().to_string();
                        self.report_here(ParseError::ExpectedClassName(got));
                    }
                },
                TokenKind::Colon => {
                    if let Some(entry) = self.consume_pseudo() {
                        selector.entries.push(entry);
                    }
                }
                TokenKind::Ident(name) => selector.entries.push(SelectorEntry::Element(name)),
                TokenKind::Hash { value, is_id: true } => {
                    selector.entries.push(SelectorEntry::Id(value))
                }
                TokenKind::OpenSquare => {
                    if let Some(entry) = self.consume_attribute_selector() {
                        selector.entries.push(entry);
                    }
                }
                kind => {
                    self.report(
                        token.line,
                        ParseError::UnexpectedTokenInSelector(kind.to_string()),
                    );
                }
            }
        }

        if selector.entries.is_empty() {
            None
        } else {
            Some(selector)
        }
    }

    /// What follows a `:` in a selector: `:name`, `::name` or `:not(name)`.
    fn consume_pseudo(&mut self) -> Option<SelectorEntry> {
        match self.front_kind() {
            TokenKind::Colon => {
                self.tokens.pop_front();
                match self.take_ident() {
                    Some(name) => Some(SelectorEntry::PseudoElement(name)),
                    None => {
                        let got = self.tokens.front().to_string();
                        self.report_here(ParseError::ExpectedPseudoName(got));
                        None
                    }
                }
            }
            TokenKind::Function(name) if name == "not" => {
                self.tokens.pop_front();
                let negated = self.take_ident();
                let closed = matches!(self.front_kind(), TokenKind::CloseParen);
                match negated {
                    Some(name) if closed => {
                        self.tokens.pop_front();
                        Some(SelectorEntry::PseudoClass(format!("!{name}")))
                    }
                    _ => {
                        self.report_here(ParseError::MalformedNot);
                        self.skip_function_arguments();
                        None
                    }
                }
            }
            TokenKind::Ident(_) => self.take_ident().map(SelectorEntry::PseudoClass),
            TokenKind::Function(_) => {
                let name = self.tokens.take_front().text().to_string();
                self.skip_function_arguments();
                Some(SelectorEntry::PseudoClass(name))
            }
            TokenKind::OpenCurly | TokenKind::Eof => {
                let got = self.tokens.front().to_string();
                self.report_here(ParseError::ExpectedPseudoName(got));
                None
            }
            _ => {
                let token = self.tokens.take_front();
                self.report(
                    token.line,
                    ParseError::ExpectedPseudoName(token.to_string()),
                );
                None
            }
        }
    }

    /// Skip a function's arguments through the closing `)`. Stops short of a
    /// `{` so the declaration block survives an unclosed argument list.
    fn skip_function_arguments(&mut self) {
        loop {
            match self.front_kind() {
                TokenKind::CloseParen => {
                    self.tokens.pop_front();
                    return;
                }
                TokenKind::OpenCurly | TokenKind::Eof => return,
                _ => self.tokens.pop_front(),
            }
        }
    }

    /// Body of `[...]`, with the `[` already consumed.
    fn consume_attribute_selector(&mut self) -> Option<SelectorEntry> {
        let line = self.tokens.front().line;
        let mut name: Option<String> = None;
        let mut value: Option<String> = None;
        let mut matcher = AttrMatcher::Exists;

        loop {
            match self.front_kind() {
                TokenKind::Eof => break,
                TokenKind::CloseSquare => {
                    self.tokens.pop_front();
                    break;
                }
                _ => {}
            }

            let token = self.tokens.take_front();
            match token.kind {
                TokenKind::Ident(text) | TokenKind::Str(text) if name.is_none() => {
                    name = Some(text)
                }
                TokenKind::Ident(text) | TokenKind::Str(text) if value.is_none() => {
                    value = Some(text)
                }
                TokenKind::Delim('=') => matcher = AttrMatcher::Exact,
                TokenKind::IncludeMatch => matcher = AttrMatcher::Include,
                TokenKind::DashMatch => matcher = AttrMatcher::Dash,
                TokenKind::PrefixMatch => matcher = AttrMatcher::Prefix,
                TokenKind::SuffixMatch => matcher = AttrMatcher::Suffix,
                TokenKind::SubstringMatch => matcher = AttrMatcher::Substring,
                kind => {
                    self.report(
                        token.line,
                        ParseError::UnexpectedTokenInAttribute(kind.to_string()),
                    );
                    self.skip_attribute_selector();
                    return None;
                }
            }
        }

        match name {
            Some(name) if !name.is_empty() => Some(SelectorEntry::Attribute {
                name,
                matcher,
                value: value.unwrap_or_default(),
            }),
            _ => {
                self.report(line, ParseError::EmptyAttributeName);
                None
            }
        }
    }

    /// Skip past the `]` of a rejected attribute selector. Stops short of a
    /// `{` so an unclosed `[` cannot swallow the declaration block.
    fn skip_attribute_selector(&mut self) {
        loop {
            match self.front_kind() {
                TokenKind::CloseSquare => {
                    self.tokens.pop_front();
                    return;
                }
                TokenKind::OpenCurly | TokenKind::Eof => return,
                _ => self.tokens.pop_front(),
            }
        }
    }

    /// Declarations up to and including the closing `}`.
    fn consume_declaration_list(&mut self) -> Vec<Property> {
        let mut properties = Vec::new();

        loop {
            match self.front_kind() {
                TokenKind::CloseCurly => {
                    self.tokens.pop_front();
                    break;
                }
                TokenKind::Eof => break,
                TokenKind::Ident(_) => {
                    if let Some(property) = self.consume_declaration() {
                        properties.push(property);
                    }
                }
                _ => {
                    let token = self.tokens.take_front();
                    self.report(
                        token.line,
                        ParseError::UnexpectedTokenInBlock(token.to_string()),
                    );
                }
            }
        }

        properties
    }

    /// `name: value...`, with the name as the front token.
    fn consume_declaration(&mut self) -> Option<Property> {
        let line = self.tokens.front().line;
        let name = self.take_ident()?;

        if !matches!(self.front_kind(), TokenKind::Colon) {
            self.report(line, ParseError::ExpectedColon(name));
            self.consume_value();
            return None;
        }
        self.tokens.pop_front();

        let value = self.consume_value();
        if value.is_empty() {
            self.report(line, ParseError::EmptyDeclaration(name));
            return None;
        }

        Some(Property { name, value })
    }

    /// Value tokens up to `;` (consumed) or `}` (left for the caller).
    fn consume_value(&mut self) -> Vec<Token> {
        let mut value = Vec::new();

        loop {
            match self.front_kind() {
                TokenKind::Semicolon => {
                    self.tokens.pop_front();
                    break;
                }
                TokenKind::CloseCurly | TokenKind::Eof => break,
                _ => value.push(self.tokens.take_front()),
            }
        }

        value
    }
}
