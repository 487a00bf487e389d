//! Terminal colour theme.
//!
//! Every logical kind of output (messages, diff lines, summary columns) maps to
//! an optional 16-colour ANSI foreground. Users can override any entry with a
//! YAML file; entries the file leaves out keep their defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    DiffAdded,
    DiffRemoved,
    DiffHeader,
    SummaryRuleName,
    SummaryOccurrences,
    /// `U+XXXX` labels of removed code points.
    CodePoint,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 11] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::DiffAdded,
        ThemeEntry::DiffRemoved,
        ThemeEntry::DiffHeader,
        ThemeEntry::SummaryRuleName,
        ThemeEntry::SummaryOccurrences,
        ThemeEntry::CodePoint,
    ];
}

/// A named ANSI colour, stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor(String);

#[derive(Debug, Clone, Error)]
#[error(
    "Invalid theme color '{0}'; expected one of: black, red, green, yellow, blue, magenta, cyan, white, \
     brightblack, brightred, brightgreen, brightyellow, brightblue, brightmagenta, brightcyan, brightwhite."
)]
pub struct ParseThemeColorError(String);

const COLOR_NAMES: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if COLOR_NAMES.iter().any(|(name, _)| *name == lower) {
            Ok(ThemeColor(lower))
        } else {
            Err(ParseThemeColorError(s.to_string()))
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(c: ThemeColor) -> Self {
        c.0
    }
}

impl ThemeColor {
    pub fn named(name: &str) -> Self {
        ThemeColor(name.to_string())
    }

    pub fn to_ansi_color(&self) -> AnsiColors {
        COLOR_NAMES
            .iter()
            .find(|(name, _)| *name == self.0)
            .map(|(_, color)| *color)
            .unwrap_or(AnsiColors::White)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

impl ThemeStyle {
    fn fg(name: &str) -> Self {
        ThemeStyle { fg: Some(ThemeColor::named(name)) }
    }

    pub fn default_theme_map() -> ThemeMap {
        ThemeEntry::ALL
            .into_iter()
            .map(|entry| {
                let style = match entry {
                    ThemeEntry::Header | ThemeEntry::DiffHeader => ThemeStyle::fg("brightcyan"),
                    ThemeEntry::Success | ThemeEntry::DiffAdded => ThemeStyle::fg("green"),
                    ThemeEntry::Warn => ThemeStyle::fg("yellow"),
                    ThemeEntry::Error | ThemeEntry::DiffRemoved => ThemeStyle::fg("red"),
                    ThemeEntry::SummaryOccurrences => ThemeStyle::fg("brightyellow"),
                    ThemeEntry::CodePoint => ThemeStyle::fg("magenta"),
                    ThemeEntry::Info | ThemeEntry::SummaryRuleName => ThemeStyle::fg("white"),
                };
                (entry, style)
            })
            .collect()
    }

    /// Loads a YAML theme file and fills in defaults for missing entries.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        let mut theme = ThemeStyle::default_theme_map();
        theme.extend(custom);
        Ok(theme)
    }
}

/// Loads the theme from `theme_path`, or returns the default theme.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => ThemeStyle::load_from_file(path),
        None => Ok(ThemeStyle::default_theme_map()),
    }
}
