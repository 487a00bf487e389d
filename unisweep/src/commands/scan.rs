//! `scan` command: report what a profile would remove without emitting the text.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

use unisweep_core::{RemovalSummaryItem, SanitizationEngine, SanitizeStats};

use crate::commands::{info_msg, InputText};
use crate::ui::summary;
use crate::ui::theme::ThemeMap;

pub struct ScanOptions {
    pub input: InputText,
    pub language: Option<String>,
    pub profile_name: String,
    pub json_file: Option<PathBuf>,
    pub json_stdout: bool,
    pub fail_over_threshold: Option<usize>,
    pub quiet: bool,
}

/// The machine-readable scan result.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub profile: String,
    pub profile_fingerprint: String,
    pub language: Option<String>,
    pub stats: SanitizeStats,
    pub removals: Vec<RemovalSummaryItem>,
    pub total_removed_by_rules: usize,
}

#[derive(Debug, Error)]
#[error("{removed} code points would be removed, exceeding the threshold of {threshold}")]
pub struct ThresholdExceeded {
    pub removed: usize,
    pub threshold: usize,
}

pub fn run_scan(engine: &dyn SanitizationEngine, opts: ScanOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting scan operation.");

    let (stats, removals) = opts
        .input
        .analyze(engine, opts.language.as_deref())
        .context("Scan failed")?;
    let total: usize = removals.iter().map(|r| r.occurrences).sum();

    let scan = ScanReport {
        profile: opts.profile_name.clone(),
        profile_fingerprint: engine.profile().fingerprint()?,
        language: opts.language.clone(),
        stats,
        removals,
        total_removed_by_rules: total,
    };

    if opts.json_stdout {
        let json = serde_json::to_string_pretty(&scan).context("Failed to serialize scan report")?;
        writeln!(io::stdout().lock(), "{}", json).context("Failed to write to stdout")?;
    } else {
        if let Some(path) = &opts.json_file {
            let json = serde_json::to_string_pretty(&scan).context("Failed to serialize scan report")?;
            fs::write(path, json).with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
            if !opts.quiet {
                info_msg(format!("Scan report written to {}", path.display()), theme);
            }
        }
        if !opts.quiet {
            let use_color = io::stderr().is_terminal();
            summary::print_summary(&scan.removals, &scan.stats, &mut io::stderr(), theme, use_color)?;
        }
    }

    if let Some(threshold) = opts.fail_over_threshold {
        if total > threshold {
            return Err(ThresholdExceeded { removed: total, threshold }.into());
        }
    }

    info!("Scan operation completed.");
    Ok(())
}
