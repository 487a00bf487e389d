// unisweep/src/ui/diff_viewer.rs
//! Unified diff between the original and the cleaned text.
//!
//! Invisible characters would make removed and added lines look identical,
//! so removed lines are shown with every non-printing code point rendered as
//! a `<U+XXXX>` marker.

use diffy::{create_patch, Line as DiffLine};
use std::io::{self, Write};

use unisweep_core::classifiers::{code_point_label, counts_as_invisible, is_control, is_bidi_control};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Renders code points that do not display on their own as `<U+XXXX>`.
pub fn reveal_invisibles(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c != '\n' && (counts_as_invisible(c) || is_control(c) || is_bidi_control(c)) {
            out.push('<');
            out.push_str(&code_point_label(c));
            out.push('>');
        } else {
            out.push(c);
        }
    }
    out
}

pub fn print_diff<W: Write>(
    original: &str,
    cleaned: &str,
    writer: &mut W,
    theme: &ThemeMap,
    use_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, cleaned);
    writeln!(writer, "{}", styled("--- Diff View ---", ThemeEntry::DiffHeader, theme, use_color))?;

    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    changed = true;
                    let text = format!("-{}", reveal_invisibles(s.trim_end_matches('\n')));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffRemoved, theme, use_color))?;
                }
                DiffLine::Insert(s) => {
                    changed = true;
                    let text = format!("+{}", s.trim_end_matches('\n'));
                    writeln!(writer, "{}", styled(&text, ThemeEntry::DiffAdded, theme, use_color))?;
                }
                DiffLine::Context(s) => {
                    writeln!(writer, " {}", s.trim_end_matches('\n'))?;
                }
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes.")?;
    }
    writeln!(writer, "{}", styled("-----------------", ThemeEntry::DiffHeader, theme, use_color))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    #[test]
    fn test_reveal_invisibles() {
        assert_eq!(reveal_invisibles("a\u{200B}b\u{202E}"), "a<U+200B>b<U+202E>");
        assert_eq!(reveal_invisibles("plain \u{1F600}"), "plain \u{1F600}");
    }

    #[test]
    fn test_print_diff_marks_changed_lines() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_diff("keep\npay\u{200B}pal\n", "keep\npaypal\n", &mut buf, &theme, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("-pay<U+200B>pal"));
        assert!(out.contains("+paypal"));
        assert!(out.contains(" keep"));
    }

    #[test]
    fn test_print_diff_without_changes() {
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        print_diff("same\n", "same\n", &mut buf, &theme, false).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("No changes."));
    }
}
