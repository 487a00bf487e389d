//! # unisweep Core Library
//!
//! `unisweep-core` cleans untrusted Unicode text before it is shown, stored,
//! compared or fed to another system. It removes invisible characters,
//! control and format characters, bidirectional overrides, tag characters,
//! stray variation selectors, non-characters, private-use code points and
//! orphaned combining marks, optionally strips HTML/XML and Markdown, and
//! always returns text in a chosen normalization form.
//!
//! All behavior is driven by a declarative [`Profile`]. Three presets cover
//! the common cases, and per-language allow-lists keep the joiners and
//! spaces that Arabic, Indic and Southeast Asian scripts depend on.
//!
//! ## Modules
//!
//! * `classifiers`: Pure code point predicates (tag characters, variation selectors, ...).
//! * `markup`: HTML/XML and Markdown stripping with entity decoding.
//! * `whitespace`: Whitespace run collapsing.
//! * `profile`: The `Profile` type, JSON loading, validation and fingerprints.
//! * `presets`: The built-in `emoji_safe`, `max_sterile` and `markup_intact` profiles.
//! * `pipeline`: The ordered sanitization stages and the public call contract.
//! * `report`: Statistics and per-rule removal summaries.
//! * `engine`: The `SanitizationEngine` trait.
//! * `engines`: Concrete implementations of `SanitizationEngine`.
//! * `headless`: A one-shot convenience wrapper.
//! * `errors`: The `UnisweepError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use unisweep_core::{sanitize, sanitize_with_report, EMOJI_SAFE_PROFILE};
//!
//! fn main() -> Result<(), unisweep_core::UnisweepError> {
//!     // A zero-width space hidden inside a word, and an emoji with its
//!     // presentation selector.
//!     let input = "pay\u{200B}pal \u{1F600}\u{FE0F}";
//!     let cleaned = sanitize(input, &EMOJI_SAFE_PROFILE, None)?;
//!     assert_eq!(cleaned, "paypal \u{1F600}\u{FE0F}");
//!
//!     // Arabic keeps its joiner when the language is known.
//!     let arabic = "\u{0644}\u{200D}\u{0645}";
//!     assert_eq!(sanitize(arabic, &EMOJI_SAFE_PROFILE, Some("ar"))?, arabic);
//!
//!     let report = sanitize_with_report(input, &EMOJI_SAFE_PROFILE, None)?;
//!     assert_eq!(report.stats.removed_chars, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Text is never rejected: absent input becomes an empty string, and
//! malformed markup or stray code points are simply cleaned. Errors come from
//! malformed profiles (`UnisweepError::InvalidProfile`,
//! `UnisweepError::InvalidCodePoint`) and from the final normalization check
//! (`UnisweepError::Normalization`). Loaders return `anyhow::Result` with
//! context attached.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod classifiers;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod markup;
pub mod pipeline;
pub mod presets;
pub mod profile;
pub mod report;
pub mod whitespace;

/// Re-exports the custom error type.
pub use errors::UnisweepError;

/// Re-exports the profile model and loaders.
pub use profile::{
    list_available_profiles, load_profile, profile_candidate_paths, CategoryPolicy, CodePoint, LanguageOverride,
    MarkupPolicy, NormalizationForm, PrivateUseScope, Profile, ProfileSource, ProfileSummary,
    VariationSelectorPolicy,
};

/// Re-exports the built-in presets.
pub use presets::{
    preset_by_name, EMOJI_SAFE, EMOJI_SAFE_PROFILE, MARKUP_INTACT, MARKUP_INTACT_PROFILE, MAX_STERILE,
    MAX_STERILE_PROFILE, PRESET_NAMES,
};

/// Re-exports the call contract.
pub use pipeline::{sanitize, sanitize_opt, sanitize_utf16, sanitize_with_report};

/// Re-exports report types.
pub use report::{RemovalRule, RemovalSummaryItem, SanitizeReport, SanitizeStats};

/// Re-exports the engine trait and its implementation.
pub use engine::SanitizationEngine;
pub use engines::unicode_engine::UnicodeEngine;

pub use headless::headless_sanitize_string;
