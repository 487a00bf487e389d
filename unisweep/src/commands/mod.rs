// unisweep/src/commands/mod.rs
//! Subcommand implementations and the helpers they share: themed stderr
//! messages, input decoding, and profile resolution from command-line options.

pub mod profiles;
pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, warn};
use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use unisweep_core::{
    load_profile, sanitize_utf16, CodePoint, Profile, RemovalSummaryItem, SanitizationEngine, SanitizeReport,
    SanitizeStats,
};

use crate::cli::ProfileArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let use_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, use_color);
}

pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let use_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, use_color);
}

pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let use_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, use_color);
}

/// Raw input as read from a file or stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputText {
    Utf8(String),
    /// Input that began with a UTF-16 byte order mark, as code units without the mark.
    Utf16(Vec<u16>),
}

impl InputText {
    /// Decodes bytes. A UTF-16 byte order mark selects UTF-16; everything else
    /// is read as UTF-8, with invalid sequences replaced by U+FFFD.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let utf16 = |big_endian: bool, body: &[u8]| {
            let units = body
                .chunks_exact(2)
                .map(|pair| {
                    if big_endian {
                        u16::from_be_bytes([pair[0], pair[1]])
                    } else {
                        u16::from_le_bytes([pair[0], pair[1]])
                    }
                })
                .collect();
            InputText::Utf16(units)
        };

        match bytes.as_slice() {
            [0xFF, 0xFE, body @ ..] => utf16(false, body),
            [0xFE, 0xFF, body @ ..] => utf16(true, body),
            _ => match String::from_utf8(bytes) {
                Ok(text) => InputText::Utf8(text),
                Err(e) => {
                    warn!("Input is not valid UTF-8; invalid sequences were replaced with U+FFFD.");
                    InputText::Utf8(String::from_utf8_lossy(e.as_bytes()).into_owned())
                }
            },
        }
    }

    /// The input as text, for diffs. Lone surrogates show as U+FFFD.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            InputText::Utf8(text) => Cow::Borrowed(text),
            InputText::Utf16(units) => Cow::Owned(String::from_utf16_lossy(units)),
        }
    }

    /// Runs the engine's pipeline. UTF-16 input goes through the surrogate-aware
    /// entry point with the engine's profile.
    pub fn sanitize(&self, engine: &dyn SanitizationEngine, language: Option<&str>) -> Result<SanitizeReport> {
        match self {
            InputText::Utf8(text) => engine.sanitize(text, language),
            InputText::Utf16(units) => Ok(sanitize_utf16(units, engine.profile(), language)?),
        }
    }

    /// Statistics and per-rule removals only, through the engine's analysis path.
    pub fn analyze(
        &self,
        engine: &dyn SanitizationEngine,
        language: Option<&str>,
    ) -> Result<(SanitizeStats, Vec<RemovalSummaryItem>)> {
        match self {
            InputText::Utf8(text) => engine.analyze_for_stats(text, language),
            InputText::Utf16(units) => {
                let report = sanitize_utf16(units, engine.profile(), language)?;
                Ok((report.stats, report.removals))
            }
        }
    }
}

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>, theme: &ThemeMap, quiet: bool) -> Result<InputText> {
    let bytes = match path {
        Some(path) => {
            if !quiet {
                info_msg(format!("Reading input from file: {}", path.display()), theme);
            }
            fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => {
            if !quiet {
                info_msg("Reading input from stdin...", theme);
            }
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("Failed to read from stdin")?;
            buf
        }
    };
    debug!("Read {} bytes of input.", bytes.len());
    Ok(InputText::from_bytes(bytes))
}

/// Loads the selected profile and applies `--allow` and `--keep-newlines`.
pub fn resolve_profile(args: &ProfileArgs) -> Result<Profile> {
    let profile = load_profile(&args.profile).with_context(|| format!("Failed to load profile '{}'", args.profile))?;

    let mut extra = Vec::with_capacity(args.allow.len() + 2);
    for raw in &args.allow {
        let cp: CodePoint = raw.trim().parse().with_context(|| format!("Invalid --allow value '{}'", raw))?;
        extra.push(cp.as_char());
    }
    if args.keep_newlines {
        extra.extend(['\n', '\t']);
    }
    if !extra.is_empty() {
        debug!("Adding {} code points to the hard allowlist from the command line.", extra.len());
    }

    let profile = profile.with_allowed(extra);
    profile.validate().context("Profile failed validation")?;
    Ok(profile)
}
