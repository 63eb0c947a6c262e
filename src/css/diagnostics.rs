//! Parse diagnostics and where they are sent.
//!
//! The parser never fails as a whole. Each recoverable problem becomes a
//! [`Diagnostic`] handed to a [`DiagnosticSink`], and the offending
//! construct is dropped from the resulting stylesheet.

use std::fmt;

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token in selector: '{0}'")]
    UnexpectedTokenInSelector(String),
    #[error("expected class name after '.', got '{0}'")]
    ExpectedClassName(String),
    #[error("expected pseudo-class or pseudo-element name, got '{0}'")]
    ExpectedPseudoName(String),
    #[error("malformed ':not()' pseudo-class")]
    MalformedNot,
    #[error("unexpected token in attribute selector: '{0}'")]
    UnexpectedTokenInAttribute(String),
    #[error("attribute selector has no attribute name")]
    EmptyAttributeName,
    #[error("unexpected token in block: '{0}'")]
    UnexpectedTokenInBlock(String),
    #[error("expected ':' after property '{0}'")]
    ExpectedColon(String),
    #[error("declaration is empty: '{0}'")]
    EmptyDeclaration(String),
    #[error("unexpected end of input before '{{'")]
    UnexpectedEof,
}

/// A [`ParseError`] and the source line it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub error: ParseError,
}

impl Diagnostic {
    pub fn new(line: u32, error: ParseError) -> Self {
        Self { line, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Receiver for parse diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in report order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs each diagnostic with `tracing::warn!`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    source: Option<String>,
}

impl TracingSink {
    /// `source` names the stylesheet in log output.
    pub fn new(source: Option<String>) -> Self {
        Self { source }
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &self.source {
            Some(source) => {
                tracing::warn!(source = %source, line = diagnostic.line, "CSS: {}", diagnostic.error)
            }
            None => tracing::warn!(line = diagnostic.line, "CSS: {}", diagnostic.error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new(3, ParseError::ExpectedColon("color".into()));
        assert_eq!(diag.to_string(), "line 3: expected ':' after property 'color'");
    }

    #[test]
    fn test_eof_message_braces() {
        assert_eq!(
            ParseError::UnexpectedEof.to_string(),
            "unexpected end of input before '{'"
        );
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::new(1, ParseError::MalformedNot));
        sink.report(Diagnostic::new(2, ParseError::EmptyAttributeName));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].line, 2);
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        let mut sink = TracingSink::new(Some("theme.css".into()));
        sink.report(Diagnostic::new(1, ParseError::UnexpectedEof));
        TracingSink::default().report(Diagnostic::new(1, ParseError::UnexpectedEof));
    }
}
