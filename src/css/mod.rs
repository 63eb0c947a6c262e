//! Stylesheet front end: preprocessor, tokenizer, token stream, parser, AST.
//!
//! Data flows one way: text → [`preprocess`] → [`tokenizer`] →
//! [`token_range`] → [`parser`] → [`model::StyleSheet`].

pub mod diagnostics;
pub mod model;
pub mod parser;
pub mod preprocess;
pub mod token;
pub mod token_range;
pub mod tokenizer;
