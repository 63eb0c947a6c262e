//! Input normalization ahead of tokenization.

/// Number of NUL scalars appended after the input.
///
/// The tokenizer looks at most three scalars ahead, so it never has to check
/// whether a lookahead position exists.
pub const SENTINEL_LEN: usize = 3;

/// Normalize stylesheet source into the scalar sequence the tokenizer reads.
///
/// - `\r\n`, a lone `\r` and `\x0C` all become a single `\n`
/// - NUL becomes U+FFFD, so every NUL in the output is end-of-input padding
/// - [`SENTINEL_LEN`] NUL scalars are appended
pub fn preprocess(input: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(input.len() + SENTINEL_LEN);
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{000C}' => out.push('\n'),
            '\0' => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }

    out.extend(std::iter::repeat('\0').take(SENTINEL_LEN));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body(input: &str) -> String {
        let chars = preprocess(input);
        chars[..chars.len() - SENTINEL_LEN].iter().collect()
    }

    #[test]
    fn test_line_endings_collapse() {
        assert_eq!(body("a\r\nb\rc\u{000C}d\ne"), "a\nb\nc\nd\ne");
    }

    #[test]
    fn test_crlf_is_one_newline() {
        assert_eq!(body("\r\n\r\n"), "\n\n");
    }

    #[test]
    fn test_nul_replaced() {
        assert_eq!(body("a\0b"), "a\u{FFFD}b");
    }

    #[test]
    fn test_sentinel_padding() {
        let chars = preprocess("");
        assert_eq!(chars, vec!['\0'; SENTINEL_LEN]);

        let chars = preprocess("x");
        assert_eq!(chars.len(), 1 + SENTINEL_LEN);
        assert!(chars[1..].iter().all(|&c| c == '\0'));
    }
}
