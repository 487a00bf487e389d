//! presets.rs - Built-in cleaning profiles.
//!
//! The three presets are process-wide constants, built on first use and never
//! mutated afterwards. Script-specific behavior (keeping ZWJ/ZWNJ for Arabic
//! and Indic scripts, ZWSP for Thai and Khmer) is carried by the language
//! overrides every preset inherits from `emoji_safe`, selected at call time by
//! the language tag.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::classifiers::{INVISIBLES, VS15, VS16, ZWJ, ZWNJ, ZWSP};
use crate::profile::{
    CategoryPolicy, CodePoint, LanguageOverride, MarkupPolicy, NormalizationForm, PrivateUseScope,
    Profile, VariationSelectorPolicy,
};

pub const EMOJI_SAFE: &str = "emoji_safe";
pub const MAX_STERILE: &str = "max_sterile";
pub const MARKUP_INTACT: &str = "markup_intact";

/// Canonical preset names, in display order.
pub const PRESET_NAMES: &[&str] = &[EMOJI_SAFE, MAX_STERILE, MARKUP_INTACT];

const PRESET_VERSION: &str = "1.0";

/// Scripts whose shaping depends on the zero-width joiner and non-joiner.
const JOINER_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic: ZWJ/ZWNJ control cursive joining."),
    ("fa", "Persian: ZWNJ separates morphemes without a space."),
    ("ur", "Urdu: ZWJ/ZWNJ control Nastaliq joining."),
    ("ps", "Pashto: ZWJ/ZWNJ control cursive joining."),
    ("hi", "Hindi: ZWJ/ZWNJ select conjunct and half forms."),
    ("mr", "Marathi: ZWJ selects the eyelash ra."),
    ("ne", "Nepali: ZWJ/ZWNJ select conjunct forms."),
    ("bn", "Bengali: ZWJ/ZWNJ select conjunct forms."),
    ("pa", "Punjabi: ZWJ/ZWNJ select conjunct forms."),
    ("gu", "Gujarati: ZWJ/ZWNJ select conjunct forms."),
    ("ta", "Tamil: ZWJ/ZWNJ select ligature forms."),
    ("te", "Telugu: ZWJ/ZWNJ select conjunct forms."),
    ("kn", "Kannada: ZWJ/ZWNJ select conjunct forms."),
    ("ml", "Malayalam: ZWJ forms chillu letters."),
    ("si", "Sinhala: ZWJ forms yansaya and rakaransaya."),
];

/// Scripts written without spaces that use ZWSP as a line-break hint.
const ZWSP_LANGUAGES: &[(&str, &str)] = &[
    ("th", "Thai: ZWSP marks word boundaries for line breaking."),
    ("km", "Khmer: ZWSP marks word boundaries for line breaking."),
    ("lo", "Lao: ZWSP marks word boundaries for line breaking."),
    ("my", "Burmese: ZWSP marks word boundaries for line breaking."),
];

fn script_overrides() -> BTreeMap<String, LanguageOverride> {
    let joiners = JOINER_LANGUAGES.iter().map(|(tag, note)| {
        (
            tag.to_string(),
            LanguageOverride { allow: vec![CodePoint(ZWJ), CodePoint(ZWNJ)], comments: Some(note.to_string()) },
        )
    });
    let spaces = ZWSP_LANGUAGES.iter().map(|(tag, note)| {
        (
            tag.to_string(),
            LanguageOverride { allow: vec![CodePoint(ZWSP)], comments: Some(note.to_string()) },
        )
    });
    joiners.chain(spaces).collect()
}

fn emoji_safe() -> Profile {
    Profile {
        version: PRESET_VERSION.to_string(),
        normalize_form: NormalizationForm::Nfc,
        use_compatibility_normalize: false,
        collapse_whitespace: true,
        markup_policy: MarkupPolicy { html_xml: true, markdown: true, code_fences: true },
        category_policy: CategoryPolicy { cc: true, cf: true, cs: true },
        remove_noncharacters: true,
        private_use_policy: PrivateUseScope::All,
        remove_isolated_combining_marks: true,
        strip_directionality_controls: true,
        strip_soft_hyphen_and_discretionary: true,
        strip_invisible_separators: true,
        strip_tag_characters: true,
        variation_selector_policy: VariationSelectorPolicy::EmojiSafekeep,
        strip_bom_anywhere: true,
        language_overrides: script_overrides(),
        hard_allowlist: [CodePoint(VS15), CodePoint(VS16)].into_iter().collect(),
        hard_blocklist: INVISIBLES.iter().copied().map(CodePoint).collect(),
    }
}

fn max_sterile() -> Profile {
    Profile {
        use_compatibility_normalize: true,
        variation_selector_policy: VariationSelectorPolicy::All,
        hard_allowlist: Default::default(),
        ..emoji_safe()
    }
}

fn markup_intact() -> Profile {
    Profile { markup_policy: MarkupPolicy::default(), ..emoji_safe() }
}

pub static EMOJI_SAFE_PROFILE: Lazy<Profile> = Lazy::new(emoji_safe);
pub static MAX_STERILE_PROFILE: Lazy<Profile> = Lazy::new(max_sterile);
pub static MARKUP_INTACT_PROFILE: Lazy<Profile> = Lazy::new(markup_intact);

/// Looks up a preset by name. Case-insensitive; `-` and `_` are interchangeable.
pub fn preset_by_name(name: &str) -> Option<&'static Profile> {
    match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        EMOJI_SAFE => Some(&*EMOJI_SAFE_PROFILE),
        MAX_STERILE => Some(&*MAX_STERILE_PROFILE),
        MARKUP_INTACT => Some(&*MARKUP_INTACT_PROFILE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for name in PRESET_NAMES {
            let preset = preset_by_name(name).unwrap();
            preset.validate().unwrap();
        }
    }

    #[test]
    fn test_preset_name_lookup() {
        assert!(preset_by_name("emoji_safe").is_some());
        assert!(preset_by_name("Emoji-Safe").is_some());
        assert!(preset_by_name(" max-sterile ").is_some());
        assert!(preset_by_name("MARKUP_INTACT").is_some());
        assert!(preset_by_name("paranoid").is_none());
    }

    #[test]
    fn test_max_sterile_differs_only_where_documented() {
        let base = emoji_safe();
        let sterile = max_sterile();
        assert!(sterile.use_compatibility_normalize);
        assert_eq!(sterile.variation_selector_policy, VariationSelectorPolicy::All);
        assert!(sterile.hard_allowlist.is_empty());
        let realigned = Profile {
            use_compatibility_normalize: base.use_compatibility_normalize,
            variation_selector_policy: base.variation_selector_policy,
            hard_allowlist: base.hard_allowlist.clone(),
            ..sterile
        };
        assert_eq!(realigned, base);
    }

    #[test]
    fn test_markup_intact_differs_only_in_markup() {
        let intact = markup_intact();
        assert!(!intact.markup_policy.any());
        let realigned = Profile { markup_policy: emoji_safe().markup_policy, ..intact };
        assert_eq!(realigned, emoji_safe());
    }

    #[test]
    fn test_emoji_safe_allows_presentation_selectors() {
        let preset = &*EMOJI_SAFE_PROFILE;
        assert!(preset.hard_allowlist.contains(&CodePoint(VS15)));
        assert!(preset.hard_allowlist.contains(&CodePoint(VS16)));
        assert_eq!(preset.hard_blocklist.len(), INVISIBLES.len());
        let arabic = preset.effective_allow_set(Some("ar"));
        assert!(arabic.contains(&ZWJ) && arabic.contains(&ZWNJ));
        let thai = preset.effective_allow_set(Some("th"));
        assert!(thai.contains(&ZWSP));
        assert!(!thai.contains(&ZWJ));
    }

    #[test]
    fn test_presets_survive_json_round_trip() {
        for name in PRESET_NAMES {
            let preset = preset_by_name(name).unwrap();
            let json = preset.to_json_pretty().unwrap();
            let parsed = Profile::from_json_str(&json).unwrap();
            assert_eq!(&parsed, preset);
        }
    }
}
