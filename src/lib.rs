//! # toolkit-css
//!
//! The stylesheet front end of a CSS-styled widget toolkit: turns CSS-like
//! source text into a [`StyleSheet`] of at-rules and rule sets for the style
//! resolution code to consume.
//!
//! Parsing is loss-tolerant. A malformed declaration, selector entry or rule
//! is reported through a [`DiagnosticSink`] and dropped; everything around it
//! still parses. Property values are kept as raw [`Token`]s.
//!
//! ## Core Systems
//!
//! - **[`css::tokenizer`]** — CSS Syntax Level 3 tokenizer over normalized input
//! - **[`css::token_range`]** — Pull-based token stream the parser reads
//! - **[`css::parser`]** — Recursive descent parser with local error recovery
//! - **[`css::model`]** — StyleSheet, AtRule, RuleSet, Selector, Property
//! - **[`testing`]** — Snapshot helpers for assertions on parsed stylesheets
//!
//! ```
//! use toolkit_css::parse_css;
//!
//! let sheet = parse_css("Button.primary:hover { color: #fff; }");
//! assert_eq!(sheet.rulesets[0].properties[0].name, "color");
//! ```

pub mod css;
pub mod testing;

pub use css::diagnostics::{Diagnostic, DiagnosticSink, ParseError, TracingSink};
pub use css::model::{AtRule, AttrMatcher, Property, RuleSet, Selector, SelectorEntry, StyleSheet};
pub use css::parser::{parse_css, parse_css_with, parse_css_with_config, Parser, ParserConfig};
pub use css::token::{Token, TokenKind};
pub use css::token_range::TokenRange;
pub use css::tokenizer::{tokenize, Tokenizer};
