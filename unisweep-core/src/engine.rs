// unisweep-core/src/engine.rs
//! Defines the `SanitizationEngine` trait.
//!
//! The trait separates the CLI and other callers from how cleaning is done.
//! Every engine is bound to one immutable profile at construction time and
//! can be shared across threads.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::profile::Profile;
use crate::report::{RemovalSummaryItem, SanitizeReport, SanitizeStats};

pub trait SanitizationEngine: Send + Sync {
    /// Cleans `content` and returns the text along with its report.
    ///
    /// # Arguments
    /// * `content` - The input string to sanitize.
    /// * `language` - Optional language tag selecting a language override.
    fn sanitize(&self, content: &str, language: Option<&str>) -> Result<SanitizeReport>;

    /// Runs the pipeline but returns only the statistics and per-rule
    /// removals, for callers that report on input without emitting it.
    fn analyze_for_stats(
        &self,
        content: &str,
        language: Option<&str>,
    ) -> Result<(SanitizeStats, Vec<RemovalSummaryItem>)>;

    /// The profile this engine was built with.
    fn profile(&self) -> &Profile;
}
