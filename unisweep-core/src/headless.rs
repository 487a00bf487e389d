// File: unisweep-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot, non-interactive sanitization of a string.

use anyhow::Result;

use crate::engine::SanitizationEngine;
use crate::engines::unicode_engine::UnicodeEngine;
use crate::profile::Profile;

/// Cleans `content` under `profile` and returns only the text.
///
/// # Arguments
///
/// * `profile` - The cleaning profile, validated before use.
/// * `content` - The string to be sanitized.
/// * `language` - Optional language tag selecting a language override.
pub fn headless_sanitize_string(profile: Profile, content: &str, language: Option<&str>) -> Result<String> {
    let engine: Box<dyn SanitizationEngine> = Box::new(UnicodeEngine::new(profile)?);
    let report = engine.sanitize(content, language)?;
    Ok(report.text)
}
