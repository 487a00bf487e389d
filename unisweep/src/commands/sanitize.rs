//! `sanitize` command: clean input and write the result.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use unisweep_core::{SanitizationEngine, SanitizeReport};

use crate::commands::{info_msg, success_msg, warn_msg, InputText};
use crate::ui::diff_viewer;
use crate::ui::summary;
use crate::ui::theme::ThemeMap;
use crate::utils::clipboard::copy_to_clipboard;

/// Options for a single `sanitize` run.
pub struct SanitizeOptions {
    pub input: InputText,
    pub language: Option<String>,
    pub clipboard: bool,
    pub diff: bool,
    pub output_path: Option<PathBuf>,
    pub no_summary: bool,
    pub quiet: bool,
}

pub fn run_sanitize(engine: &dyn SanitizationEngine, opts: SanitizeOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting sanitize operation.");

    let report = opts
        .input
        .sanitize(engine, opts.language.as_deref())
        .context("Sanitization failed")?;

    debug!(
        "Content sanitized. Original chars: {}, cleaned chars: {}",
        report.stats.original_chars, report.stats.cleaned_chars
    );

    handle_primary_output(&opts, &report, theme)?;

    if opts.clipboard {
        handle_clipboard_output(&report.text, theme);
    }

    if !opts.no_summary && !opts.quiet {
        let use_color = io::stderr().is_terminal();
        summary::print_summary(&report.removals, &report.stats, &mut io::stderr(), theme, use_color)?;
    }

    info!("Sanitize operation completed.");
    Ok(())
}

fn handle_primary_output(opts: &SanitizeOptions, report: &SanitizeReport, theme: &ThemeMap) -> Result<()> {
    let original = opts.input.as_text();
    match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing cleaned content to file: {}", path.display()), theme);
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            if opts.diff {
                diff_viewer::print_diff(&original, &report.text, &mut file, theme, false)?;
            } else {
                writeln!(file, "{}", report.text)
                    .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            }
        }
        None => {
            let stdout = io::stdout();
            let use_color = stdout.is_terminal();
            let mut writer = stdout.lock();
            if opts.diff {
                diff_viewer::print_diff(&original, &report.text, &mut writer, theme, use_color)?;
            } else {
                writeln!(writer, "{}", report.text).context("Failed to write to stdout")?;
            }
        }
    }
    Ok(())
}

fn handle_clipboard_output(content: &str, theme: &ThemeMap) {
    match copy_to_clipboard(content) {
        Ok(()) => success_msg("Cleaned content copied to clipboard.", theme),
        Err(e) => warn_msg(format!("Failed to copy to clipboard: {:#}", e), theme),
    }
}
