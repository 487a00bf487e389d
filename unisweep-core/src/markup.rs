//! markup.rs - Removes HTML/XML and Markdown syntax ahead of code point filtering.
//!
//! Markup is stripped first so the per-code-point filter sees content text,
//! not tag names or attribute values that could smuggle invisible characters.
//! Three sub-modes run in a fixed order: HTML/XML (followed by entity
//! decoding), fenced code blocks, then inline Markdown. Fences go before the
//! inline pass so their backticks are never read as code spans.
//!
//! Malformed input never panics. HTML and fence patterns are single
//! left-to-right `regex` passes. The inline Markdown pass repeats until the
//! text stops changing, at most `MAX_INLINE_PASSES` times, so markers that only
//! line up once an inner construct is removed (`[[a](b)](c)`) are handled too.
//! How each unterminated construct is handled:
//!
//! * `<script>` / `<style>` without a closing tag: consumed to end of input.
//! * `<!--` without `-->`: consumed to end of input.
//! * `<` with no closing `>`, or not followed by a tag-name character: literal.
//! * an opening code fence with no closing fence: literal.
//! * unbalanced emphasis markers, `[text]` without `(url)`: literal.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use crate::classifiers::is_combining_mark;
use crate::profile::MarkupPolicy;

/// Upper bound on inline Markdown passes. Each pass that changes the text
/// removes at least two characters.
const MAX_INLINE_PASSES: usize = 32;

lazy_static! {
    static ref SCRIPT_RE: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)").unwrap();
    static ref STYLE_RE: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|\z)").unwrap();
    static ref COMMENT_RE: Regex = Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap();
    static ref CDATA_RE: Regex = Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<(?:/?[A-Za-z][^<>]*|![^<>]*|\?[^<>]*)>").unwrap();
    static ref ENTITY_RE: Regex =
        Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9A-Fa-f]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));").unwrap();

    static ref BACKTICK_FENCE_RE: Regex = Regex::new(r"(?ms)^[ \t]*```[^\n]*\n.*?^[ \t]*```[ \t]*$").unwrap();
    static ref TILDE_FENCE_RE: Regex = Regex::new(r"(?ms)^[ \t]*~~~[^\n]*\n.*?^[ \t]*~~~[ \t]*$").unwrap();

    static ref CODE_SPAN_RE: Regex = Regex::new(r"`+([^`\n]+?)`+").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap();
    // Link text never contains `[`, so the innermost link of a nest matches first.
    static ref LINK_RE: Regex = Regex::new(r"\[([^\[\]\n]+)\]\(([^)\n]*)\)").unwrap();
    static ref STRONG_STAR_RE: Regex = Regex::new(r"\*\*([^*\s](?:[^*\n]*[^*\s])?)\*\*").unwrap();
    static ref STRONG_UNDERSCORE_RE: Regex = Regex::new(r"__([^_\s](?:[^_\n]*[^_\s])?)__").unwrap();
    static ref STRIKE_RE: Regex = Regex::new(r"~~([^~\s](?:[^~\n]*[^~\s])?)~~").unwrap();
    static ref EM_STAR_RE: Regex = Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").unwrap();
    // Word boundaries are checked around each match, see `unwrap_underscore_emphasis`.
    static ref EM_UNDERSCORE_RE: Regex = Regex::new(r"_([^_\s](?:[^_\n]*[^_\s])?)_").unwrap();
    static ref BLOCKQUOTE_RE: Regex = Regex::new(r"(?m)^[ \t]*(?:>[ \t]?)+").unwrap();
}

/// Applies every enabled sub-mode of `policy`, in the fixed order.
pub fn strip_markup(text: &str, policy: &MarkupPolicy) -> String {
    let mut out = text.to_string();
    if policy.html_xml {
        out = strip_html(&out);
    }
    if policy.code_fences {
        out = strip_code_fences(&out);
    }
    if policy.markdown {
        out = strip_inline_markdown(&out);
    }
    debug!(
        "Markup stripped (html={}, fences={}, inline={}): {} -> {} bytes",
        policy.html_xml,
        policy.code_fences,
        policy.markdown,
        text.len(),
        out.len()
    );
    out
}

/// Removes `<script>`/`<style>` elements with their contents, comments and
/// remaining tags, then decodes entities.
pub fn strip_html(text: &str) -> String {
    let out = SCRIPT_RE.replace_all(text, "");
    let out = STYLE_RE.replace_all(&out, "");
    let out = COMMENT_RE.replace_all(&out, "");
    let out = CDATA_RE.replace_all(&out, "$1");
    let out = TAG_RE.replace_all(&out, "");
    decode_entities(&out)
}

/// Decodes numeric and named character references in one pass, so a decoded
/// `&` never starts another reference.
///
/// Numeric references to NUL, a surrogate, or beyond U+10FFFF become U+FFFD.
/// Named references use the full HTML5 table; unknown names are left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let numeric = caps
                .get(1)
                .map(|m| m.as_str().parse::<u32>().ok())
                .or_else(|| caps.get(2).map(|m| u32::from_str_radix(m.as_str(), 16).ok()));

            match numeric {
                Some(value) => value
                    .filter(|&v| v != 0)
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}')
                    .to_string(),
                None => decode_named_entity(&caps[0]).unwrap_or_else(|| caps[0].to_string()),
            }
        })
        .into_owned()
}

/// Decodes one complete `&name;` reference.
///
/// Every HTML5 name expands to one or two code points. A longer result means
/// only a legacy prefix such as `&amp` matched, which is not a full reference.
fn decode_named_entity(reference: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(reference);
    if decoded != reference && decoded.chars().count() <= 2 {
        Some(decoded.into_owned())
    } else {
        None
    }
}

/// Replaces each complete fenced code block with a single space.
pub fn strip_code_fences(text: &str) -> String {
    let out = BACKTICK_FENCE_RE.replace_all(text, " ");
    TILDE_FENCE_RE.replace_all(&out, " ").into_owned()
}

/// Unwraps code spans and emphasis, drops images and blockquote markers, and
/// reduces links to their text.
pub fn strip_inline_markdown(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_INLINE_PASSES {
        let next = inline_markdown_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
    debug!("Inline Markdown still changing after {} passes.", MAX_INLINE_PASSES);
    current
}

fn inline_markdown_pass(text: &str) -> String {
    let out = CODE_SPAN_RE.replace_all(text, "$1");
    let out = IMAGE_RE.replace_all(&out, " ");
    let out = LINK_RE.replace_all(&out, "$1");
    let out = STRONG_STAR_RE.replace_all(&out, "$1");
    let out = STRONG_UNDERSCORE_RE.replace_all(&out, "$1");
    let out = STRIKE_RE.replace_all(&out, "$1");
    let out = EM_STAR_RE.replace_all(&out, "$1");
    let out = unwrap_underscore_emphasis(&out);
    BLOCKQUOTE_RE.replace_all(&out, "").into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

/// `_em_` is emphasis only when neither neighbour is a word character, so
/// `snake_case` stays intact. The neighbours are inspected, not consumed, and
/// a rejected candidate resumes the search one byte later.
fn unwrap_underscore_emphasis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(caps) = EM_UNDERSCORE_RE.captures_at(text, pos) {
        let (whole, inner) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(inner)) => (whole, inner),
            _ => break,
        };
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            out.push_str(&text[copied..whole.start()]);
            out.push_str(inner.as_str());
            copied = whole.end();
            pos = whole.end();
        } else {
            // The match starts with the one-byte `_`.
            pos = whole.start() + 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}
