//! pipeline.rs - The ordered sanitization pipeline.
//!
//! Stages run in a fixed order: markup stripping, normalization, the
//! per-code-point filter, directionality stripping, isolated-mark removal,
//! whitespace collapsing, and a final normalization whose result is verified
//! before it is returned. The profile is only read; every call derives its
//! own effective allow set, so concurrent calls never share state.
//!
//! Malformed input never causes an error. The only failure is the final
//! normalization check, which is reported instead of partially cleaned text.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use std::collections::HashSet;

use crate::classifiers::{
    counts_as_invisible, is_bidi_control, is_combining_mark, is_control, is_format_control, is_invisible, is_letter_or_number,
    is_noncharacter, is_private_use, is_surrogate_unit, is_tag_character, is_variation_selector, BOM,
    SOFT_HYPHEN,
};
use crate::errors::UnisweepError;
use crate::markup::strip_markup;
use crate::profile::{NormalizationForm, Profile, VariationSelectorPolicy};
use crate::report::{RemovalRule, RemovalTally, SanitizeReport, SanitizeStats};
use crate::whitespace::collapse_whitespace;

/// Cleans `text` under `profile`, applying the language override for
/// `language` when one exists.
pub fn sanitize(text: &str, profile: &Profile, language: Option<&str>) -> Result<String, UnisweepError> {
    let mut tally = RemovalTally::new();
    run_pipeline(text, profile, language, &mut tally)
}

/// Like [`sanitize`], but absent input yields an empty string.
pub fn sanitize_opt(
    text: Option<&str>,
    profile: &Profile,
    language: Option<&str>,
) -> Result<String, UnisweepError> {
    match text {
        Some(text) => sanitize(text, profile, language),
        None => Ok(String::new()),
    }
}

/// Cleans `text` and reports statistics and per-rule removals.
pub fn sanitize_with_report(
    text: &str,
    profile: &Profile,
    language: Option<&str>,
) -> Result<SanitizeReport, UnisweepError> {
    let mut tally = RemovalTally::new();
    let cleaned = run_pipeline(text, profile, language, &mut tally)?;
    let stats = SanitizeStats::compute(text, &cleaned);
    Ok(SanitizeReport { text: cleaned, stats, removals: tally.into_summary() })
}

/// Cleans UTF-16 input, the one place an unpaired surrogate can appear.
///
/// Lone surrogates are dropped when the profile removes Cs, and replaced with
/// U+FFFD otherwise. Each one counts as one original character.
pub fn sanitize_utf16(
    units: &[u16],
    profile: &Profile,
    language: Option<&str>,
) -> Result<SanitizeReport, UnisweepError> {
    let mut tally = RemovalTally::new();
    let mut decoded = String::with_capacity(units.len());
    let mut original_chars = 0usize;
    let mut invisible_chars = 0usize;

    for item in char::decode_utf16(units.iter().copied()) {
        original_chars += 1;
        match item {
            Ok(c) => {
                if counts_as_invisible(c) {
                    invisible_chars += 1;
                }
                decoded.push(c);
            }
            Err(e) => {
                let unit = e.unpaired_surrogate();
                debug_assert!(is_surrogate_unit(unit));
                if profile.category_policy.cs {
                    tally.credit_raw(RemovalRule::CsSurrogate, unit as u32);
                } else {
                    decoded.push(char::REPLACEMENT_CHARACTER);
                }
            }
        }
    }

    let cleaned = run_pipeline(&decoded, profile, language, &mut tally)?;
    let stats = SanitizeStats::from_counts(original_chars, cleaned.chars().count(), invisible_chars);
    Ok(SanitizeReport { text: cleaned, stats, removals: tally.into_summary() })
}

fn run_pipeline(
    text: &str,
    profile: &Profile,
    language: Option<&str>,
    tally: &mut RemovalTally,
) -> Result<String, UnisweepError> {
    info!(
        "Sanitizing {} bytes (profile {}, language {}).",
        text.len(),
        profile.short_fingerprint(),
        language.unwrap_or("-")
    );

    let mut current = if profile.markup_policy.any() {
        strip_markup(text, &profile.markup_policy)
    } else {
        text.to_string()
    };

    let first_form = if profile.use_compatibility_normalize {
        NormalizationForm::Nfkc
    } else {
        profile.normalize_form
    };
    current = first_form.apply(&current);
    debug!("Normalized to {}.", first_form);

    let allowed = profile.effective_allow_set(language);

    current = filter_code_points(&current, profile, &allowed, tally);

    if profile.strip_directionality_controls {
        current = strip_bidi_controls(&current, &allowed, tally);
    }

    if profile.remove_isolated_combining_marks {
        current = remove_isolated_marks(&current, &allowed, tally);
    }

    if profile.collapse_whitespace {
        current = collapse_whitespace(&current);
    }

    let form = profile.normalize_form;
    let out = form.apply(&current);
    if !form.is_normalized(&out) {
        return Err(UnisweepError::Normalization {
            form,
            detail: format!("{} code points were not stable after normalization", out.chars().count()),
        });
    }

    info!(
        "Sanitization complete: {} -> {} bytes, {} code points removed by rules.",
        text.len(),
        out.len(),
        tally.total()
    );
    Ok(out)
}

/// The first removal rule that fires for `c`, if any.
fn removal_rule_for(c: char, profile: &Profile) -> Option<RemovalRule> {
    let categories = &profile.category_policy;

    if categories.cc && is_control(c) {
        return Some(RemovalRule::CcControl);
    }
    if profile.strip_bom_anywhere && c == BOM {
        return Some(RemovalRule::Bom);
    }
    if categories.cf && is_format_control(c) {
        return Some(RemovalRule::CfFormat);
    }
    if profile.strip_invisible_separators && is_invisible(c) {
        return Some(RemovalRule::InvisibleSeparator);
    }
    if profile.strip_soft_hyphen_and_discretionary && c == SOFT_HYPHEN {
        return Some(RemovalRule::SoftHyphen);
    }
    if profile.strip_tag_characters && is_tag_character(c) {
        return Some(RemovalRule::TagCharacter);
    }
    let drops_selector = match profile.variation_selector_policy {
        VariationSelectorPolicy::None => false,
        VariationSelectorPolicy::EmojiSafekeep => is_variation_selector(c, true, false),
        VariationSelectorPolicy::All => is_variation_selector(c, false, false),
    };
    if drops_selector {
        return Some(RemovalRule::VariationSelector);
    }
    if profile.remove_noncharacters && is_noncharacter(c) {
        return Some(RemovalRule::Noncharacter);
    }
    if is_private_use(c, profile.private_use_policy) {
        return Some(RemovalRule::PrivateUse);
    }
    None
}

fn filter_code_points(
    text: &str,
    profile: &Profile,
    allowed: &HashSet<char>,
    tally: &mut RemovalTally,
) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if allowed.contains(&c) {
            out.push(c);
            continue;
        }
        match removal_rule_for(c, profile) {
            Some(rule) => tally.credit(rule, c),
            None => out.push(c),
        }
    }
    debug!("Code point filter done: {} removals so far.", tally.total());
    out
}

fn strip_bidi_controls(text: &str, allowed: &HashSet<char>, tally: &mut RemovalTally) -> String {
    text.chars()
        .filter(|&c| {
            if is_bidi_control(c) && !allowed.contains(&c) {
                tally.credit(RemovalRule::BidiControl, c);
                false
            } else {
                true
            }
        })
        .collect()
}

/// Drops combining marks that have no letter or number to attach to.
/// Marks stacked on a valid base are kept; the base is the nearest preceding
/// code point that is not itself a mark.
fn remove_isolated_marks(text: &str, allowed: &HashSet<char>, tally: &mut RemovalTally) -> String {
    let mut out = String::with_capacity(text.len());
    let mut base: Option<char> = None;
    for c in text.chars() {
        if !is_combining_mark(c) {
            base = Some(c);
            out.push(c);
            continue;
        }
        let attached = base.is_some_and(is_letter_or_number);
        if attached || allowed.contains(&c) {
            out.push(c);
        } else {
            tally.credit(RemovalRule::IsolatedCombiningMark, c);
        }
    }
    out
}
