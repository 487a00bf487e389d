//! classifiers.rs - Pure code point predicates used by the sanitization pipeline.
//!
//! Every function here answers a single question about one Unicode scalar
//! value and holds no state between calls, so the pipeline can evaluate them
//! in any order, from any thread. Range tests are written out directly;
//! general-category questions go to the pinned tables in
//! `unicode-general-category`.
//!
//! License: MIT OR APACHE 2.0

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::profile::PrivateUseScope;

pub const ZWSP: char = '\u{200B}';
pub const ZWNJ: char = '\u{200C}';
pub const ZWJ: char = '\u{200D}';
pub const SOFT_HYPHEN: char = '\u{00AD}';
pub const BOM: char = '\u{FEFF}';
/// VS15, text presentation selector.
pub const VS15: char = '\u{FE0E}';
/// VS16, emoji presentation selector.
pub const VS16: char = '\u{FE0F}';

/// The curated set of invisible separators and joiners.
pub const INVISIBLES: &[char] = &[
    ZWSP,
    ZWNJ,
    ZWJ,
    '\u{200E}', // LRM
    '\u{200F}', // RLM
    '\u{202A}', // LRE
    '\u{202B}', // RLE
    '\u{202C}', // PDF
    '\u{202D}', // LRO
    '\u{202E}', // RLO
    '\u{2066}', // LRI
    '\u{2067}', // RLI
    '\u{2068}', // FSI
    '\u{2069}', // PDI
    '\u{2060}', // word joiner
    SOFT_HYPHEN,
    '\u{180E}', // Mongolian vowel separator
    BOM,
];

/// Membership in the curated invisible set.
pub fn is_invisible(c: char) -> bool {
    INVISIBLES.contains(&c)
}

/// General category Cc, plus the C0 range and DEL by direct range test.
pub fn is_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}')
        || get_general_category(c) == GeneralCategory::Control
}

/// General category Cf.
pub fn is_format_control(c: char) -> bool {
    get_general_category(c) == GeneralCategory::Format
}

/// A UTF-16 code unit in the surrogate range (general category Cs).
///
/// A `char` can never be a surrogate, so this is the only place Cs can be
/// observed: while decoding UTF-16 input.
pub fn is_surrogate_unit(unit: u16) -> bool {
    (0xD800..=0xDFFF).contains(&unit)
}

pub fn is_tag_character(c: char) -> bool {
    ('\u{E0000}'..='\u{E007F}').contains(&c)
}

/// Variation selector test under a removal policy.
///
/// `keep_all` keeps every selector; `keep_emoji` keeps VS15/VS16 only.
pub fn is_variation_selector(c: char, keep_emoji: bool, keep_all: bool) -> bool {
    if keep_all {
        return false;
    }
    if keep_emoji && (c == VS15 || c == VS16) {
        return false;
    }
    matches!(c, '\u{FE00}'..='\u{FE0F}' | '\u{E0100}'..='\u{E01EF}')
}

/// Permanently reserved non-characters: U+FDD0..U+FDEF and the last two code
/// points of every plane.
pub fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    (0xFDD0..=0xFDEF).contains(&cp) || matches!(cp & 0xFFFF, 0xFFFE | 0xFFFF)
}

pub fn is_private_use(c: char, scope: PrivateUseScope) -> bool {
    let cp = c as u32;
    match scope {
        PrivateUseScope::None => false,
        PrivateUseScope::BmpOnly => (0xE000..=0xF8FF).contains(&cp),
        PrivateUseScope::All => {
            (0xE000..=0xF8FF).contains(&cp)
                || (0xF0000..=0xFFFFD).contains(&cp)
                || (0x100000..=0x10FFFD).contains(&cp)
        }
    }
}

/// Directional formatting characters: ALM, LRM, RLM, the embeddings and
/// overrides, and the isolates.
pub fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{061C}' | '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// General category Mn, Mc or Me.
pub fn is_combining_mark(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark | GeneralCategory::EnclosingMark
    )
}

/// A code point a combining mark may legitimately attach to (L* or N*).
pub fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Any Unicode White_Space character other than the line feed.
pub fn is_horizontal_whitespace(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}

/// Whether a code point counts toward the "invisible characters" statistic.
pub fn counts_as_invisible(c: char) -> bool {
    is_invisible(c)
        || is_format_control(c)
        || is_tag_character(c)
        || is_variation_selector(c, false, false)
}

/// Renders a code point as `U+XXXX` for logs and reports.
pub fn code_point_label(c: char) -> String {
    format!("U+{:04X}", c as u32)
}
