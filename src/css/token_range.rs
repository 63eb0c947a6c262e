//! Pull-based token stream over a [`Tokenizer`].
//!
//! Tokens are produced one at a time as the parser asks for them. Whitespace
//! and the `<!--`/`-->` markers never reach the parser: the stylesheet
//! grammar has no use for them, so [`TokenRange::pop_front`] drops them.

use crate::css::token::{Token, TokenKind};
use crate::css::tokenizer::Tokenizer;

/// Lazy view of the filtered token stream with one token of lookahead.
#[derive(Debug)]
pub struct TokenRange {
    tokenizer: Tokenizer,
    front: Token,
}

impl TokenRange {
    /// Wrap `tokenizer`, reading the first token immediately.
    pub fn new(tokenizer: Tokenizer) -> Self {
        let line = tokenizer.line();
        let mut range = Self {
            tokenizer,
            front: Token::new(TokenKind::Eof, line),
        };
        range.pop_front();
        range
    }

    /// The current token. [`TokenKind::Eof`] once the input is exhausted.
    pub fn front(&self) -> &Token {
        &self.front
    }

    /// `true` once the front token is end of input.
    pub fn is_empty(&self) -> bool {
        self.front.is_eof()
    }

    /// Advance to the next significant token.
    pub fn pop_front(&mut self) {
        loop {
            let mut token = self.tokenizer.consume_token();
            if matches!(
                token.kind,
                TokenKind::Whitespace | TokenKind::Cdo | TokenKind::Cdc
            ) {
                continue;
            }
            token.line = self.tokenizer.line();
            self.front = token;
            return;
        }
    }

    /// Take the front token and advance past it.
    pub fn take_front(&mut self) -> Token {
        let line = self.front.line;
        let token = std::mem::replace(&mut self.front, Token::new(TokenKind::Eof, line));
        self.pop_front();
        token
    }
}

/// Yields every remaining significant token, stopping before end of input.
impl Iterator for TokenRange {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.is_empty() {
            return None;
        }
        Some(self.take_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(input: &str) -> TokenRange {
        TokenRange::new(Tokenizer::new(input))
    }

    #[test]
    fn test_front_and_pop() {
        let mut tokens = range("a  b");
        assert_eq!(tokens.front().kind, TokenKind::Ident("a".into()));
        tokens.pop_front();
        assert_eq!(tokens.front().kind, TokenKind::Ident("b".into()));
        tokens.pop_front();
        assert!(tokens.is_empty());
        tokens.pop_front();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_filters_whitespace_cdo_cdc() {
        let kinds: Vec<_> = range("<!-- a --> <!-- -->").map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Ident("a".into())]);
    }

    #[test]
    fn test_empty_input() {
        assert!(range("").is_empty());
        assert!(range("  \n <!-- -->  ").is_empty());
    }

    #[test]
    fn test_lines_stamped() {
        let lines: Vec<_> = range("a\n\nb\nc").map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn test_take_front() {
        let mut tokens = range("x;");
        let x = tokens.take_front();
        assert_eq!(x.kind, TokenKind::Ident("x".into()));
        assert_eq!(tokens.front().kind, TokenKind::Semicolon);
    }
}
