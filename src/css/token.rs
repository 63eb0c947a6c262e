//! Token types produced by the [`Tokenizer`](crate::css::tokenizer::Tokenizer).

use std::fmt;

/// The kind of a token together with the payload that kind carries.
///
/// Variants follow the token set of CSS Syntax Level 3.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<ident-token>`: `color`, `-my-name`.
    Ident(String),
    /// `<function-token>`: the name before `(`; the `(` itself is consumed.
    Function(String),
    /// `<at-keyword-token>`, without the leading `@`.
    AtKeyword(String),
    /// `<hash-token>`, without the leading `#`.
    ///
    /// `is_id` is set when the value would also start an identifier, which is
    /// what admits it as an `#id` selector (`#fff` is one, `#000` is not).
    Hash { value: String, is_id: bool },
    /// `<string-token>`, without quotes and with escapes resolved.
    Str(String),
    /// `<bad-string-token>`: a string cut off by a raw newline. Carries the
    /// text read before the newline.
    BadStr(String),
    /// `<url-token>`: the body of `url(...)`.
    Url(String),
    /// `<bad-url-token>`.
    BadUrl,
    /// `<delim-token>`: any single scalar with no token of its own.
    Delim(char),
    /// `<number-token>`. `repr` is the literal source text, sign included.
    Number { repr: String, is_integer: bool },
    /// `<percentage-token>`. `repr` excludes the `%`.
    Percentage { repr: String, is_integer: bool },
    /// `<dimension-token>`: a number immediately followed by a unit name.
    Dimension {
        repr: String,
        is_integer: bool,
        unit: String,
    },
    /// `<unicode-range-token>`, inclusive bounds.
    UnicodeRange(u32, u32),
    /// `~=`
    IncludeMatch,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,
    /// `||`
    Column,
    Whitespace,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    Colon,
    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    OpenCurly,
    CloseCurly,
    Eof,
}

/// A token and the source line it was read on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Line of the tokenizer when the token was finished, 1-based by default.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }

    /// The textual payload: the name, string, url body, hash value or number
    /// literal. Empty for kinds that carry no text.
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Ident(s)
            | TokenKind::Function(s)
            | TokenKind::AtKeyword(s)
            | TokenKind::Str(s)
            | TokenKind::BadStr(s)
            | TokenKind::Url(s)
            | TokenKind::Hash { value: s, .. }
            | TokenKind::Number { repr: s, .. }
            | TokenKind::Percentage { repr: s, .. }
            | TokenKind::Dimension { repr: s, .. } => s,
            _ => "",
        }
    }

    /// Numeric value of a number, percentage or dimension token.
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.kind {
            TokenKind::Number { repr, .. }
            | TokenKind::Percentage { repr, .. }
            | TokenKind::Dimension { repr, .. } => repr.parse().ok(),
            _ => None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// Serializes the token back to CSS source form. Strings are re-quoted with
/// `"` and `\` escaped; names are written as stored.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => f.write_str(s),
            TokenKind::Function(s) => write!(f, "{s}("),
            TokenKind::AtKeyword(s) => write!(f, "@{s}"),
            TokenKind::Hash { value, .. } => write!(f, "#{value}"),
            TokenKind::Str(s) => {
                write_quoted(f, s)?;
                f.write_str("\"")
            }
            TokenKind::BadStr(s) => write_quoted(f, s),
            TokenKind::Url(s) => write!(f, "url({s})"),
            TokenKind::BadUrl => f.write_str("url()"),
            TokenKind::Delim(c) => write!(f, "{c}"),
            TokenKind::Number { repr, .. } => f.write_str(repr),
            TokenKind::Percentage { repr, .. } => write!(f, "{repr}%"),
            TokenKind::Dimension { repr, unit, .. } => write!(f, "{repr}{unit}"),
            TokenKind::UnicodeRange(start, end) if start == end => write!(f, "U+{start:X}"),
            TokenKind::UnicodeRange(start, end) => write!(f, "U+{start:X}-{end:X}"),
            TokenKind::IncludeMatch => f.write_str("~="),
            TokenKind::DashMatch => f.write_str("|="),
            TokenKind::PrefixMatch => f.write_str("^="),
            TokenKind::SuffixMatch => f.write_str("$="),
            TokenKind::SubstringMatch => f.write_str("*="),
            TokenKind::Column => f.write_str("||"),
            TokenKind::Whitespace => f.write_str(" "),
            TokenKind::Cdo => f.write_str("<!--"),
            TokenKind::Cdc => f.write_str("-->"),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::OpenParen => f.write_str("("),
            TokenKind::CloseParen => f.write_str(")"),
            TokenKind::OpenSquare => f.write_str("["),
            TokenKind::CloseSquare => f.write_str("]"),
            TokenKind::OpenCurly => f.write_str("{"),
            TokenKind::CloseCurly => f.write_str("}"),
            TokenKind::Eof => Ok(()),
        }
    }
}

/// Opening quote and string body, with `"` and `\` escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}
