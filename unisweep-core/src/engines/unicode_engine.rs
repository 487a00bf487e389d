//! A `SanitizationEngine` that runs the Unicode sanitization pipeline.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;

use crate::engine::SanitizationEngine;
use crate::pipeline::sanitize_with_report;
use crate::profile::Profile;
use crate::report::{RemovalSummaryItem, SanitizeReport, SanitizeStats};

#[derive(Debug, Clone)]
pub struct UnicodeEngine {
    profile: Profile,
    fingerprint: String,
}

impl UnicodeEngine {
    /// Validates `profile` and binds it to a new engine.
    pub fn new(profile: Profile) -> Result<Self> {
        profile.validate().context("Profile failed validation")?;
        let fingerprint = profile.fingerprint()?;
        debug!("UnicodeEngine created with profile {}.", &fingerprint[..8]);
        Ok(Self { profile, fingerprint })
    }

    /// Full SHA-256 fingerprint of the bound profile.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl SanitizationEngine for UnicodeEngine {
    fn sanitize(&self, content: &str, language: Option<&str>) -> Result<SanitizeReport> {
        Ok(sanitize_with_report(content, &self.profile, language)?)
    }

    fn analyze_for_stats(
        &self,
        content: &str,
        language: Option<&str>,
    ) -> Result<(SanitizeStats, Vec<RemovalSummaryItem>)> {
        let report = sanitize_with_report(content, &self.profile, language)?;
        Ok((report.stats, report.removals))
    }

    fn profile(&self) -> &Profile {
        &self.profile
    }
}
