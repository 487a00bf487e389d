// unisweep-core/tests/profile_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

use unisweep_core::{
    load_profile, preset_by_name, sanitize, CodePoint, NormalizationForm, PrivateUseScope, Profile, UnisweepError,
    VariationSelectorPolicy, EMOJI_SAFE_PROFILE,
};

const FULL_PROFILE_JSON: &str = r#"
{
  "version": "2024.1",
  "normalize": "NFKC",
  "nfkc_compat": false,
  "collapse_whitespace": true,
  "strip_markup": { "html_xml": true, "markdown": false, "code_fences": true },
  "remove_categories": { "Cc_controls": true, "Cf_format_controls": true, "Cs_surrogates": true },
  "remove_noncharacters": true,
  "remove_private_use": "bmp_only",
  "remove_isolated_combining_marks": true,
  "strip_directionality_controls": true,
  "strip_soft_hyphen_discretionary": true,
  "strip_invisible_separators": true,
  "strip_tag_chars": true,
  "strip_variation_selectors": "emoji_safekeep",
  "strip_bom_anywhere": true,
  "language_overrides": {
    "fa": { "allow": ["U+200C"], "comments": "Persian half-space" }
  },
  "hard_allowlist": ["U+FE0F", "0x2060"],
  "hard_blocklist": ["\\u{200B}"]
}
"#;

fn write_temp_profile(json: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(json.as_bytes())?;
    Ok(file)
}

#[test]
fn test_full_profile_parses() -> Result<()> {
    let profile = Profile::from_json_str(FULL_PROFILE_JSON)?;
    assert_eq!(profile.version, "2024.1");
    assert_eq!(profile.normalize_form, NormalizationForm::Nfkc);
    assert!(profile.markup_policy.html_xml);
    assert!(!profile.markup_policy.markdown);
    assert_eq!(profile.private_use_policy, PrivateUseScope::BmpOnly);
    assert_eq!(profile.variation_selector_policy, VariationSelectorPolicy::EmojiSafekeep);
    assert!(profile.hard_allowlist.contains(&CodePoint('\u{2060}')));
    assert!(profile.hard_blocklist.contains(&CodePoint('\u{200B}')));
    assert_eq!(profile.language_overrides["fa"].allow, vec![CodePoint('\u{200C}')]);
    Ok(())
}

#[test]
fn test_load_profile_from_file() -> Result<()> {
    let file = write_temp_profile(FULL_PROFILE_JSON)?;
    let path = file.path().to_string_lossy().to_string();
    let profile = load_profile(&path)?;
    assert_eq!(profile, Profile::from_json_str(FULL_PROFILE_JSON)?);

    // The word joiner is hard-allowed, the ZWNJ only for Persian.
    let text = "a\u{2060}b\u{200C}c";
    assert_eq!(sanitize(text, &profile, None)?, "a\u{2060}bc");
    assert_eq!(sanitize(text, &profile, Some("fa-IR"))?, text);
    Ok(())
}

#[test]
fn test_load_profile_by_preset_name() -> Result<()> {
    let profile = load_profile("emoji-safe")?;
    assert_eq!(profile, *EMOJI_SAFE_PROFILE);
    Ok(())
}

#[test]
fn test_load_profile_not_found() {
    let err = load_profile("definitely_not_a_profile_3f9a").unwrap_err();
    let inner = err.downcast_ref::<UnisweepError>();
    assert!(matches!(inner, Some(UnisweepError::ProfileNotFound(_))));
}

#[test]
fn test_unreadable_file_is_an_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = Profile::load_from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read profile file"));
    assert!(matches!(err.downcast_ref::<UnisweepError>(), Some(UnisweepError::IoError(_))));
    Ok(())
}

#[test]
fn test_invalid_file_reports_context() -> Result<()> {
    let file = write_temp_profile(r#"{ "version": "1", "hard_allowlist": ["U+D800"] }"#)?;
    let err = Profile::load_from_file(file.path()).unwrap_err();
    let rendered = format!("{:#}", err);
    assert!(rendered.contains("Failed to parse profile file"));
    assert!(rendered.contains("U+D800"));
    Ok(())
}

#[test]
fn test_unknown_variation_policy_rejected() {
    let json = r#"{ "version": "1", "strip_variation_selectors": "some" }"#;
    assert!(matches!(Profile::from_json_str(json), Err(UnisweepError::InvalidProfile(_))));
}

#[test]
fn test_overlap_is_a_warning_not_an_error() -> Result<()> {
    let json = r#"{ "version": "1", "hard_allowlist": ["U+200D"], "hard_blocklist": ["U+200D"] }"#;
    let profile = Profile::from_json_str(json)?;
    assert_eq!(profile.hard_allowlist.len(), 1);
    Ok(())
}

#[test]
fn test_round_trip_serializes_labels() -> Result<()> {
    let profile = Profile::from_json_str(FULL_PROFILE_JSON)?;
    let json = profile.to_json_pretty()?;
    assert!(json.contains("\"U+2060\""));
    assert!(json.contains("\"Cc_controls\": true"));
    assert!(json.contains("\"remove_private_use\": \"bmp_only\""));
    assert_eq!(Profile::from_json_str(&json)?, profile);
    assert_eq!(profile.fingerprint()?, Profile::from_json_str(&json)?.fingerprint()?);
    Ok(())
}

#[test]
fn test_presets_have_distinct_fingerprints() -> Result<()> {
    let mut prints = Vec::new();
    for name in unisweep_core::PRESET_NAMES {
        let preset = preset_by_name(name).expect("preset exists");
        prints.push(preset.fingerprint()?);
    }
    prints.sort();
    prints.dedup();
    assert_eq!(prints.len(), 3);
    Ok(())
}
