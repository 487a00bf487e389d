//! whitespace.rs - Collapses whitespace runs after code point filtering.
//!
//! "Whitespace" here is Unicode White_Space, so NBSP, ideographic space and
//! the other wide spaces that survive filtering are folded too.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINE_BREAK_RUN_RE: Regex = Regex::new(r"\s*\n\s*").unwrap();
    static ref HORIZONTAL_RUN_RE: Regex = Regex::new(r"[^\S\n]+").unwrap();
}

/// Any whitespace run containing a newline becomes one `\n`, every other run
/// becomes one space, and the ends are trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    let out = LINE_BREAK_RUN_RE.replace_all(text, "\n");
    let out = HORIZONTAL_RUN_RE.replace_all(&out, " ");
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_mixed_runs() {
        assert_eq!(collapse_whitespace("a   b\n\n  c"), "a b\nc");
        assert_eq!(collapse_whitespace("a\t\tb"), "a b");
        assert_eq!(collapse_whitespace("a \r\n b"), "a\nb");
    }

    #[test]
    fn test_collapse_unicode_spaces() {
        assert_eq!(collapse_whitespace("a\u{00A0}\u{3000}b"), "a b");
        assert_eq!(collapse_whitespace("a\u{2029}b"), "a b");
    }

    #[test]
    fn test_collapse_trims() {
        assert_eq!(collapse_whitespace("  \n padded \t"), "padded");
        assert_eq!(collapse_whitespace(" \n\t "), "");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let once = collapse_whitespace(" x \n\n y  z ");
        assert_eq!(collapse_whitespace(&once), once);
    }
}
