// File: unisweep-core/src/profile.rs

//! profile.rs - Cleaning profile configuration, loading, and helpers.
//!
//! A profile is the single declarative value that parameterizes a
//! sanitization run: normalization form, markup policy, which Unicode
//! categories and ranges are removed, and the allow-lists that override all of
//! it. Profiles are read from JSON (the schema below mirrors the field names
//! users write by hand), validated once at load time, and never mutated by the
//! pipeline.
//!
//! Besides the data structures, this module resolves profile names to files in
//! the standard search directories and computes a stable fingerprint so that a
//! report can say exactly which policy produced it.
//!
//! license: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

use crate::classifiers::code_point_label;
use crate::errors::UnisweepError;
use crate::presets;

/// Target Unicode normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NormalizationForm {
    #[default]
    #[serde(rename = "NFC")]
    Nfc,
    #[serde(rename = "NFD")]
    Nfd,
    #[serde(rename = "NFKC")]
    Nfkc,
    #[serde(rename = "NFKD")]
    Nfkd,
}

impl NormalizationForm {
    pub fn apply(self, text: &str) -> String {
        match self {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
        }
    }

    /// Full (not quick-check) test that `text` is already in this form.
    pub fn is_normalized(self, text: &str) -> bool {
        match self {
            NormalizationForm::Nfc => unicode_normalization::is_nfc(text),
            NormalizationForm::Nfd => unicode_normalization::is_nfd(text),
            NormalizationForm::Nfkc => unicode_normalization::is_nfkc(text),
            NormalizationForm::Nfkd => unicode_normalization::is_nfkd(text),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfkd => "NFKD",
        };
        f.write_str(name)
    }
}

/// Which private-use ranges are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivateUseScope {
    #[default]
    None,
    /// U+E000..U+F8FF only.
    BmpOnly,
    /// The BMP area plus supplementary planes 15 and 16.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationSelectorPolicy {
    /// Keep every variation selector.
    #[default]
    None,
    /// Remove all variation selectors except VS15/VS16.
    EmojiSafekeep,
    /// Remove every variation selector.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupPolicy {
    /// Strip HTML/XML tags and decode entities.
    pub html_xml: bool,
    /// Strip inline Markdown syntax, links and images.
    pub markdown: bool,
    /// Strip fenced code blocks.
    pub code_fences: bool,
}

impl MarkupPolicy {
    pub fn any(&self) -> bool {
        self.html_xml || self.markdown || self.code_fences
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryPolicy {
    #[serde(rename = "Cc_controls")]
    pub cc: bool,
    #[serde(rename = "Cf_format_controls")]
    pub cf: bool,
    #[serde(rename = "Cs_surrogates")]
    pub cs: bool,
}

/// A single code point as written in a profile.
///
/// Accepts a literal character, `U+XXXX`, `0xXXXX`, `\u{XXXX}` or `\uXXXX`;
/// always serializes as `U+XXXX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodePoint(pub char);

impl CodePoint {
    pub fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        CodePoint(c)
    }
}

impl From<CodePoint> for String {
    fn from(cp: CodePoint) -> Self {
        code_point_label(cp.0)
    }
}

impl TryFrom<String> for CodePoint {
    type Error = UnisweepError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for CodePoint {
    type Err = UnisweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(CodePoint(c));
        }

        let hex = s
            .strip_prefix("U+")
            .or_else(|| s.strip_prefix("u+"))
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))
            .or_else(|| s.strip_prefix("\\u{").and_then(|rest| rest.strip_suffix('}')))
            .or_else(|| s.strip_prefix("\\u"))
            .ok_or_else(|| UnisweepError::InvalidCodePoint(s.to_string()))?;

        if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(UnisweepError::InvalidCodePoint(s.to_string()));
        }

        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(CodePoint)
            .ok_or_else(|| UnisweepError::InvalidCodePoint(s.to_string()))
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&code_point_label(self.0))
    }
}

/// Per-language allow-list, layered on top of the profile's hard allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageOverride {
    pub allow: Vec<CodePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// The top-level cleaning profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub version: String,
    #[serde(rename = "normalize")]
    pub normalize_form: NormalizationForm,
    #[serde(rename = "nfkc_compat")]
    pub use_compatibility_normalize: bool,
    pub collapse_whitespace: bool,
    #[serde(rename = "strip_markup")]
    pub markup_policy: MarkupPolicy,
    #[serde(rename = "remove_categories")]
    pub category_policy: CategoryPolicy,
    pub remove_noncharacters: bool,
    #[serde(rename = "remove_private_use")]
    pub private_use_policy: PrivateUseScope,
    pub remove_isolated_combining_marks: bool,
    pub strip_directionality_controls: bool,
    #[serde(rename = "strip_soft_hyphen_discretionary")]
    pub strip_soft_hyphen_and_discretionary: bool,
    pub strip_invisible_separators: bool,
    #[serde(rename = "strip_tag_chars")]
    pub strip_tag_characters: bool,
    #[serde(rename = "strip_variation_selectors")]
    pub variation_selector_policy: VariationSelectorPolicy,
    pub strip_bom_anywhere: bool,
    pub language_overrides: BTreeMap<String, LanguageOverride>,
    pub hard_allowlist: BTreeSet<CodePoint>,
    /// Informational: the code points this profile's switches are meant to
    /// remove. Not enforced as a separate rule.
    pub hard_blocklist: BTreeSet<CodePoint>,
}

impl Default for Profile {
    /// A profile that changes nothing beyond NFC normalization.
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            normalize_form: NormalizationForm::Nfc,
            use_compatibility_normalize: false,
            collapse_whitespace: false,
            markup_policy: MarkupPolicy::default(),
            category_policy: CategoryPolicy::default(),
            remove_noncharacters: false,
            private_use_policy: PrivateUseScope::None,
            remove_isolated_combining_marks: false,
            strip_directionality_controls: false,
            strip_soft_hyphen_and_discretionary: false,
            strip_invisible_separators: false,
            strip_tag_characters: false,
            variation_selector_policy: VariationSelectorPolicy::None,
            strip_bom_anywhere: false,
            language_overrides: BTreeMap::new(),
            hard_allowlist: BTreeSet::new(),
            hard_blocklist: BTreeSet::new(),
        }
    }
}

impl Profile {
    /// Parses and validates a profile from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, UnisweepError> {
        let profile: Profile = serde_json::from_str(json)
            .map_err(|e| UnisweepError::InvalidProfile(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Loads a profile from a JSON file on disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading profile from: {}", path.display());
        let text = fs::read_to_string(path)
            .map_err(UnisweepError::from)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let profile = Profile::from_json_str(&text)
            .with_context(|| format!("Failed to parse profile file {}", path.display()))?;
        debug!(
            "Loaded profile from {} (fingerprint {}).",
            path.display(),
            profile.short_fingerprint()
        );
        Ok(profile)
    }

    pub fn to_json_pretty(&self) -> Result<String, UnisweepError> {
        serde_json::to_string_pretty(self).map_err(|e| UnisweepError::SerializationError(e.to_string()))
    }

    /// Checks the invariants serde cannot express. All problems are collected
    /// and reported together.
    pub fn validate(&self) -> Result<(), UnisweepError> {
        let mut errors = Vec::new();

        if self.version.trim().is_empty() {
            errors.push("'version' field cannot be empty.".to_string());
        }

        for (tag, entry) in &self.language_overrides {
            if !is_well_formed_language_tag(tag) {
                errors.push(format!(
                    "language override key '{}' is not a language tag (letters, digits, '-' or '_').",
                    tag
                ));
            }
            if entry.allow.is_empty() {
                warn!("Language override '{}' has an empty allow list and has no effect.", tag);
            }
        }

        let overlap: Vec<String> = self
            .hard_allowlist
            .intersection(&self.hard_blocklist)
            .map(|cp| cp.to_string())
            .collect();
        if !overlap.is_empty() {
            warn!(
                "Code points {} appear in both hard_allowlist and hard_blocklist; the allowlist wins.",
                overlap.join(", ")
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(UnisweepError::InvalidProfile(errors.join("\n")))
        }
    }

    /// SHA-256 over the canonical JSON form. Sets and maps are ordered, so two
    /// equal profiles always share a fingerprint.
    pub fn fingerprint(&self) -> Result<String, UnisweepError> {
        let canonical =
            serde_json::to_vec(self).map_err(|e| UnisweepError::SerializationError(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }

    /// First eight hex digits of the fingerprint, for log lines.
    pub fn short_fingerprint(&self) -> String {
        match self.fingerprint() {
            Ok(fp) => fp[..8].to_string(),
            Err(_) => "unknown".to_string(),
        }
    }

    /// Finds the language override for `tag`: exact key, then a
    /// case-insensitive match, then the primary subtag.
    pub fn resolve_language(&self, tag: &str) -> Option<(&str, &LanguageOverride)> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        if let Some((key, entry)) = self.language_overrides.get_key_value(tag) {
            return Some((key.as_str(), entry));
        }
        if let Some((key, entry)) = self
            .language_overrides
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(tag))
        {
            return Some((key.as_str(), entry));
        }
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        if primary.len() < tag.len() {
            return self
                .language_overrides
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(primary))
                .map(|(key, entry)| (key.as_str(), entry));
        }
        None
    }

    /// The union of the hard allowlist and the language allow-list for `language`.
    /// Built fresh on every call.
    pub fn effective_allow_set(&self, language: Option<&str>) -> HashSet<char> {
        let mut allowed: HashSet<char> = self.hard_allowlist.iter().map(|cp| cp.0).collect();
        if let Some(tag) = language {
            match self.resolve_language(tag) {
                Some((key, entry)) => {
                    debug!(
                        "Language tag '{}' resolved to override '{}' ({} code points).",
                        tag,
                        key,
                        entry.allow.len()
                    );
                    allowed.extend(entry.allow.iter().map(|cp| cp.0));
                }
                None => debug!("No language override for tag '{}'.", tag),
            }
        }
        allowed
    }

    /// Returns a copy of this profile with extra hard-allowed code points.
    pub fn with_allowed<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.hard_allowlist.extend(extra.into_iter().map(CodePoint));
        self
    }
}

fn is_well_formed_language_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Where a listed profile came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Preset,
    File(PathBuf),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub version: String,
    pub source: ProfileSource,
}

fn profile_search_dirs() -> Vec<PathBuf> {
    vec![
        dirs::home_dir().map(|p| p.join(".unisweep").join("profiles")),
        dirs::config_dir().map(|p| p.join("unisweep").join("profiles")),
        Some(PathBuf::from("/etc/unisweep/profiles")),
        Some(PathBuf::from("./config")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn profile_candidate_paths(name: &str) -> Vec<PathBuf> {
    profile_search_dirs()
        .into_iter()
        .map(|dir| dir.join(format!("{}.json", name)))
        .collect()
}

/// Resolves a profile by file path, preset name, or name in the search directories.
pub fn load_profile(name_or_path: &str) -> Result<Profile> {
    debug!("Attempting to load profile from: '{}'", name_or_path);

    let path = Path::new(name_or_path);
    if path.is_file() {
        return Profile::load_from_file(path);
    }

    if let Some(preset) = presets::preset_by_name(name_or_path) {
        debug!("Using built-in preset '{}'.", name_or_path);
        return Ok(preset.clone());
    }

    let found = profile_candidate_paths(name_or_path)
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| UnisweepError::ProfileNotFound(name_or_path.to_string()))?;

    Profile::load_from_file(&found)
}

/// Lists the presets followed by every parseable `*.json` profile in the
/// search directories. Unreadable or invalid files are skipped with a warning.
pub fn list_available_profiles() -> Vec<ProfileSummary> {
    let mut out: Vec<ProfileSummary> = presets::PRESET_NAMES
        .iter()
        .filter_map(|name| {
            presets::preset_by_name(name).map(|p| ProfileSummary {
                name: name.to_string(),
                version: p.version.clone(),
                source: ProfileSource::Preset,
            })
        })
        .collect();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    for dir in profile_search_dirs() {
        let Ok(entries) = fs::read_dir(&dir) else {
            debug!("Candidate profile directory not found: {}", dir.display());
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") || !seen_paths.insert(path.clone()) {
                continue;
            }
            match Profile::load_from_file(&path) {
                Ok(profile) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or_default()
                        .to_string();
                    out.push(ProfileSummary {
                        name,
                        version: profile.version,
                        source: ProfileSource::File(path),
                    });
                }
                Err(e) => warn!("Skipping profile at '{}': {:#}", path.display(), e),
            }
        }
    }
    out
}
