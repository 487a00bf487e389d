//! errors.rs - Custom error types for the unisweep-core library.
//!
//! Absent input is never an error (it sanitizes to the empty string). The
//! variants below cover the two remaining failure classes: a malformed profile,
//! rejected before any text is processed, and an internal processing failure,
//! reported instead of partially cleaned output.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::profile::NormalizationForm;

/// All error types produced by the `unisweep-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UnisweepError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid code point '{0}': expected a single character, U+XXXX, 0xXXXX or \\u{{XXXX}}")]
    InvalidCodePoint(String),

    #[error("Profile '{0}' not found. It is not a preset, a file path, or a profile in the search directories.")]
    ProfileNotFound(String),

    #[error("Output failed {form} normalization check: {detail}")]
    Normalization { form: NormalizationForm, detail: String },

    #[error("Failed to serialize profile: {0}")]
    SerializationError(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
