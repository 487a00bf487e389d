// unisweep/src/ui/output_format.rs
//! Themed message formatting for stderr output.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme colour for `entry` when colour is enabled.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    use_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", styled(&format!("{}{}", prefix, msg), entry, theme, use_color))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, use_color: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Info, theme, use_color)
}

pub fn print_success_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    use_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Success, theme, use_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, use_color: bool) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", msg, ThemeEntry::Warn, theme, use_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, use_color: bool) -> io::Result<()> {
    print_prefixed(writer, "Error: ", msg, ThemeEntry::Error, theme, use_color)
}
