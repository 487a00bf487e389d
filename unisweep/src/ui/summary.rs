// unisweep/src/ui/summary.rs
//! Removal summary and statistics tables.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::{self, Write};

use unisweep_core::{RemovalSummaryItem, SanitizeStats};

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// At most this many code point labels are listed per rule.
const MAX_LABELS: usize = 8;

fn code_point_cell(item: &RemovalSummaryItem) -> String {
    let mut labels = item.code_points.iter().take(MAX_LABELS).cloned().collect::<Vec<_>>().join(" ");
    if item.code_points.len() > MAX_LABELS {
        labels.push_str(&format!(" (+{} more)", item.code_points.len() - MAX_LABELS));
    }
    labels
}

pub fn build_removal_table(removals: &[RemovalSummaryItem], theme: &ThemeMap, use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Removed", "Code points"]);

    for item in removals {
        table.add_row(vec![
            Cell::new(styled(&item.rule_name, ThemeEntry::SummaryRuleName, theme, use_color)),
            Cell::new(styled(&item.occurrences.to_string(), ThemeEntry::SummaryOccurrences, theme, use_color))
                .set_alignment(CellAlignment::Right),
            Cell::new(styled(&code_point_cell(item), ThemeEntry::CodePoint, theme, use_color)),
        ]);
    }
    table
}

pub fn print_summary<W: Write>(
    removals: &[RemovalSummaryItem],
    stats: &SanitizeStats,
    writer: &mut W,
    theme: &ThemeMap,
    use_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", styled("--- Removal Summary ---", ThemeEntry::Header, theme, use_color))?;
    if removals.is_empty() {
        writeln!(writer, "{}", styled("No code points removed by any rule.", ThemeEntry::Success, theme, use_color))?;
    } else {
        writeln!(writer, "{}", build_removal_table(removals, theme, use_color))?;
    }
    writeln!(
        writer,
        "Characters: {} -> {} ({} removed, {:.1}% reduction, {} invisible in input)",
        stats.original_chars, stats.cleaned_chars, stats.removed_chars, stats.reduction_percent, stats.invisible_chars
    )?;
    writeln!(writer, "{}", styled("-----------------------", ThemeEntry::Header, theme, use_color))?;
    Ok(())
}
