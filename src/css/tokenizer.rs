//! Hand-written stylesheet tokenizer.
//!
//! Follows the state machine of CSS Syntax Level 3 ("consume a token" and the
//! algorithms it delegates to) over the scalar sequence produced by
//! [`preprocess`]. Each call to [`Tokenizer::consume_token`] yields exactly
//! one [`Token`]; comments are skipped and never produce a token.
//!
//! Lookahead is at most three scalars. The sentinel padding added by the
//! preprocessor means every such lookahead lands on a real or NUL scalar.

use crate::css::preprocess::preprocess;
use crate::css::token::{Token, TokenKind};
use crate::css::token_range::TokenRange;

/// Marks end of input; after preprocessing no other NUL remains.
const EOF: char = '\0';

/// Stateful cursor over preprocessed stylesheet source.
#[derive(Debug)]
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    /// Reused for every name and number; cleared between uses.
    scratch: String,
}

impl Tokenizer {
    /// Create a tokenizer over `input`, counting lines from 1.
    pub fn new(input: &str) -> Self {
        Self::with_first_line(input, 1)
    }

    /// Create a tokenizer whose first line is numbered `first_line`.
    pub fn with_first_line(input: &str, first_line: u32) -> Self {
        Self {
            chars: preprocess(input),
            pos: 0,
            line: first_line,
            scratch: String::new(),
        }
    }

    /// Current line: the line the cursor is on.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Consume and return the next token. Returns [`TokenKind::Eof`] forever
    /// once the input is exhausted.
    pub fn consume_token(&mut self) -> Token {
        self.skip_comments();

        let kind = self.consume_token_kind();
        let token = Token::new(kind, self.line);
        tracing::trace!(line = token.line, kind = ?token.kind, "token");
        token
    }

    fn consume_token_kind(&mut self) -> TokenKind {
        if self.peek(0) == EOF {
            return TokenKind::Eof;
        }

        let c = self.advance();
        match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::Whitespace
            }
            '"' | '\'' => self.consume_string(c),
            '#' => {
                if is_name(self.peek(0)) || is_valid_escape(self.peek(0), self.peek(1)) {
                    let is_id = would_start_identifier(self.peek(0), self.peek(1), self.peek(2));
                    let value = self.consume_name();
                    TokenKind::Hash { value, is_id }
                } else {
                    TokenKind::Delim('#')
                }
            }
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenSquare,
            ']' => TokenKind::CloseSquare,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '+' | '.' => {
                if would_start_number(c, self.peek(0), self.peek(1)) {
                    self.reconsume();
                    self.consume_numeric()
                } else {
                    TokenKind::Delim(c)
                }
            }
            '-' => {
                if would_start_number(c, self.peek(0), self.peek(1)) {
                    self.reconsume();
                    self.consume_numeric()
                } else if self.peek(0) == '-' && self.peek(1) == '>' {
                    self.advance_by(2);
                    TokenKind::Cdc
                } else if would_start_identifier(c, self.peek(0), self.peek(1)) {
                    self.reconsume();
                    self.consume_ident_like()
                } else {
                    TokenKind::Delim(c)
                }
            }
            '<' => {
                if self.peek(0) == '!' && self.peek(1) == '-' && self.peek(2) == '-' {
                    self.advance_by(3);
                    TokenKind::Cdo
                } else {
                    TokenKind::Delim(c)
                }
            }
            '@' => {
                if would_start_identifier(self.peek(0), self.peek(1), self.peek(2)) {
                    TokenKind::AtKeyword(self.consume_name())
                } else {
                    TokenKind::Delim(c)
                }
            }
            '\\' => {
                if is_valid_escape(c, self.peek(0)) {
                    self.reconsume();
                    self.consume_ident_like()
                } else {
                    TokenKind::Delim(c)
                }
            }
            '~' | '|' | '^' | '$' | '*' if self.peek(0) == '=' => {
                self.advance();
                match c {
                    '~' => TokenKind::IncludeMatch,
                    '|' => TokenKind::DashMatch,
                    '^' => TokenKind::PrefixMatch,
                    '$' => TokenKind::SuffixMatch,
                    _ => TokenKind::SubstringMatch,
                }
            }
            '|' if self.peek(0) == '|' => {
                self.advance();
                TokenKind::Column
            }
            c if c.is_ascii_digit() => {
                self.reconsume();
                self.consume_numeric()
            }
            'u' | 'U' if self.peek(0) == '+' && (is_hex(self.peek(1)) || self.peek(1) == '?') => {
                self.advance();
                self.consume_unicode_range()
            }
            c if is_name_start(c) => {
                self.reconsume();
                self.consume_ident_like()
            }
            c => TokenKind::Delim(c),
        }
    }

    // ── Cursor primitives ────────────────────────────────────────────

    fn peek(&self, offset: usize) -> char {
        self.chars.get(self.pos + offset).copied().unwrap_or(EOF)
    }

    /// Consume one scalar. At end of input the cursor stays on the sentinel.
    fn advance(&mut self) -> char {
        let c = self.peek(0);
        if c == EOF {
            return c;
        }
        self.pos += 1;
        if c == '\n' {
            self.line = self.line.saturating_add(1);
        }
        c
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Step back over the last consumed scalar.
    fn reconsume(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.pos -= 1;
        if self.chars[self.pos] == '\n' {
            self.line = self.line.saturating_sub(1);
        }
    }

    // ── Sub-algorithms ───────────────────────────────────────────────

    fn skip_comments(&mut self) {
        while self.peek(0) == '/' && self.peek(1) == '*' {
            self.advance_by(2);
            loop {
                match self.advance() {
                    EOF => return,
                    '*' if self.peek(0) == '/' => {
                        self.advance();
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    fn consume_whitespace(&mut self) {
        while is_whitespace(self.peek(0)) {
            self.advance();
        }
    }

    /// String body after the opening quote. A raw newline ends it as a bad
    /// string and is left in the input.
    fn consume_string(&mut self, ending: char) -> TokenKind {
        let mut value = String::new();
        loop {
            match self.advance() {
                c if c == ending => return TokenKind::Str(value),
                EOF => return TokenKind::Str(value),
                '\n' => {
                    self.reconsume();
                    return TokenKind::BadStr(value);
                }
                '\\' => match self.peek(0) {
                    EOF => {}
                    '\n' => {
                        self.advance();
                    }
                    _ => value.push(self.consume_escape()),
                },
                c => value.push(c),
            }
        }
    }

    /// Escaped scalar, with the cursor just past the backslash.
    fn consume_escape(&mut self) -> char {
        let c = self.advance();
        if is_hex(c) {
            let mut value = hex_value(c);
            let mut digits = 1;
            while digits < 6 && is_hex(self.peek(0)) {
                value = value * 16 + hex_value(self.advance());
                digits += 1;
            }
            if is_whitespace(self.peek(0)) {
                self.advance();
            }
            return match char::from_u32(value) {
                Some(ch) if value != 0 => ch,
                _ => char::REPLACEMENT_CHARACTER,
            };
        }
        if c == EOF {
            return char::REPLACEMENT_CHARACTER;
        }
        c
    }

    /// Longest run of name scalars and escapes.
    fn consume_name(&mut self) -> String {
        self.scratch.clear();
        loop {
            let c = self.peek(0);
            if is_name(c) {
                self.advance();
                self.scratch.push(c);
            } else if is_valid_escape(c, self.peek(1)) {
                self.advance();
                let escaped = self.consume_escape();
                self.scratch.push(escaped);
            } else {
                return self.scratch.clone();
            }
        }
    }

    /// Number literal as written, and whether it is an integer.
    fn consume_number(&mut self) -> (String, bool) {
        self.scratch.clear();
        let mut is_integer = true;

        if matches!(self.peek(0), '+' | '-') {
            let sign = self.advance();
            self.scratch.push(sign);
        }
        self.consume_digits();

        if self.peek(0) == '.' && self.peek(1).is_ascii_digit() {
            let dot = self.advance();
            self.scratch.push(dot);
            self.consume_digits();
            is_integer = false;
        }

        let (e, next, after) = (self.peek(0), self.peek(1), self.peek(2));
        if matches!(e, 'e' | 'E')
            && (next.is_ascii_digit() || (matches!(next, '+' | '-') && after.is_ascii_digit()))
        {
            let e = self.advance();
            self.scratch.push(e);
            if matches!(self.peek(0), '+' | '-') {
                let sign = self.advance();
                self.scratch.push(sign);
            }
            self.consume_digits();
            is_integer = false;
        }

        (self.scratch.clone(), is_integer)
    }

    fn consume_digits(&mut self) {
        while self.peek(0).is_ascii_digit() {
            let digit = self.advance();
            self.scratch.push(digit);
        }
    }

    fn consume_numeric(&mut self) -> TokenKind {
        let (repr, is_integer) = self.consume_number();

        if would_start_identifier(self.peek(0), self.peek(1), self.peek(2)) {
            let unit = self.consume_name();
            TokenKind::Dimension {
                repr,
                is_integer,
                unit,
            }
        } else if self.peek(0) == '%' {
            self.advance();
            TokenKind::Percentage { repr, is_integer }
        } else {
            TokenKind::Number { repr, is_integer }
        }
    }

    fn consume_ident_like(&mut self) -> TokenKind {
        let name = self.consume_name();

        if self.peek(0) != '(' {
            return TokenKind::Ident(name);
        }
        self.advance();
        if name.eq_ignore_ascii_case("url") {
            self.consume_url()
        } else {
            TokenKind::Function(name)
        }
    }

    /// Body of `url(`, with the cursor just past the `(`.
    fn consume_url(&mut self) -> TokenKind {
        self.consume_whitespace();

        if matches!(self.peek(0), '"' | '\'') {
            let quote = self.advance();
            let value = match self.consume_string(quote) {
                TokenKind::Str(value) => value,
                _ => {
                    self.consume_bad_url_remnants();
                    return TokenKind::BadUrl;
                }
            };
            self.consume_whitespace();
            if self.peek(0) == ')' {
                self.advance();
                return TokenKind::Url(value);
            }
            self.consume_bad_url_remnants();
            return TokenKind::BadUrl;
        }

        let mut value = String::new();
        loop {
            let c = self.advance();
            match c {
                ')' | EOF => return TokenKind::Url(value),
                c if is_whitespace(c) => {
                    self.consume_whitespace();
                    match self.peek(0) {
                        ')' => {
                            self.advance();
                            return TokenKind::Url(value);
                        }
                        EOF => return TokenKind::Url(value),
                        _ => {
                            self.consume_bad_url_remnants();
                            return TokenKind::BadUrl;
                        }
                    }
                }
                '"' | '\'' | '(' => {
                    self.consume_bad_url_remnants();
                    return TokenKind::BadUrl;
                }
                c if is_non_printable(c) => {
                    self.consume_bad_url_remnants();
                    return TokenKind::BadUrl;
                }
                '\\' => {
                    if is_valid_escape(c, self.peek(0)) {
                        value.push(self.consume_escape());
                    } else {
                        self.consume_bad_url_remnants();
                        return TokenKind::BadUrl;
                    }
                }
                c => value.push(c),
            }
        }
    }

    /// Skip to just past the `)` closing a malformed url, or to end of input.
    fn consume_bad_url_remnants(&mut self) {
        loop {
            let c = self.advance();
            if c == ')' || c == EOF {
                return;
            }
            if is_valid_escape(c, self.peek(0)) {
                self.consume_escape();
            }
        }
    }

    /// Range after `U+`: hex digits, optionally padded with `?` wildcards, or
    /// an explicit `start-end` pair.
    fn consume_unicode_range(&mut self) -> TokenKind {
        self.scratch.clear();
        while self.scratch.len() < 6 && is_hex(self.peek(0)) {
            let digit = self.advance();
            self.scratch.push(digit);
        }

        let mut wildcard = false;
        while self.scratch.len() < 6 && self.peek(0) == '?' {
            self.advance();
            self.scratch.push('?');
            wildcard = true;
        }

        if wildcard {
            let start = parse_hex(&self.scratch.replace('?', "0"));
            let end = parse_hex(&self.scratch.replace('?', "F"));
            return TokenKind::UnicodeRange(start, end);
        }

        let start = parse_hex(&self.scratch);
        if self.peek(0) == '-' && is_hex(self.peek(1)) {
            self.advance();
            self.scratch.clear();
            while self.scratch.len() < 6 && is_hex(self.peek(0)) {
                let digit = self.advance();
                self.scratch.push(digit);
            }
            return TokenKind::UnicodeRange(start, parse_hex(&self.scratch));
        }
        TokenKind::UnicodeRange(start, start)
    }

    /// Wrap the tokenizer in a [`TokenRange`].
    pub fn into_range(self) -> TokenRange {
        TokenRange::new(self)
    }
}

/// Tokenize `input` into the stream the parser sees: no whitespace, no
/// `<!--`/`-->`, and no trailing end-of-input token.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).into_range().collect()
}

// ── Scalar classes ───────────────────────────────────────────────────

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_value(c: char) -> u32 {
    c.to_digit(16).unwrap_or(0)
}

/// At most six hex digits, so this cannot overflow.
fn parse_hex(digits: &str) -> u32 {
    digits.chars().fold(0, |acc, c| acc * 16 + hex_value(c))
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

fn is_non_printable(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000E}'..='\u{001F}' | '\u{007F}')
}

fn is_valid_escape(first: char, second: char) -> bool {
    first == '\\' && second != '\n'
}

fn would_start_identifier(first: char, second: char, third: char) -> bool {
    match first {
        '-' => is_name_start(second) || second == '-' || is_valid_escape(second, third),
        '\\' => is_valid_escape(first, second),
        c => is_name_start(c),
    }
}

fn would_start_number(first: char, second: char, third: char) -> bool {
    match first {
        '+' | '-' => second.is_ascii_digit() || (second == '.' && third.is_ascii_digit()),
        '.' => second.is_ascii_digit(),
        c => c.is_ascii_digit(),
    }
}
