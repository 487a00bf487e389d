//! # unisweep CLI Application
//!
//! Command-line front end for `unisweep-core`: cleans text from files or
//! stdin, scans input for removable code points, and manages profiles.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Write};

use unisweep_core::{SanitizationEngine, UnicodeEngine};

use crate::cli::{Cli, Commands, ProfileArgs};
use crate::commands::sanitize::{run_sanitize, SanitizeOptions};
use crate::commands::scan::{run_scan, ScanOptions};
use crate::commands::{read_input, resolve_profile};
use crate::ui::output_format;
use crate::ui::theme::{build_theme_map, ThemeMap};

fn build_engine(args: &ProfileArgs) -> Result<Box<dyn SanitizationEngine>> {
    let profile = resolve_profile(args)?;
    let engine = UnicodeEngine::new(profile).context("Failed to initialize the sanitization engine")?;
    debug!("Engine ready with profile '{}' ({}).", args.profile, &engine.fingerprint()[..8]);
    Ok(Box::new(engine))
}

/// Loads the `--theme` file, or the default theme when none is given.
pub fn load_theme(cli: &Cli) -> Result<ThemeMap> {
    build_theme_map(cli.theme.as_deref()).context("Failed to load theme")
}

/// Prints the error chain of a failed run through `theme`.
pub fn report_error<W: Write>(err: &anyhow::Error, writer: &mut W, theme: &ThemeMap, use_color: bool) -> io::Result<()> {
    debug!("Command failed: {:?}", err);
    output_format::print_error_message(writer, &format!("{:#}", err), theme, use_color)
}

/// Runs a parsed command line. The caller is responsible for logger setup.
pub fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    info!("unisweep started. Version: {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Sanitize(cmd) => {
            let engine = build_engine(&cmd.profile_args)?;
            let input = read_input(cmd.profile_args.input_file.as_deref(), theme, cli.quiet)?;
            let opts = SanitizeOptions {
                input,
                language: cmd.profile_args.lang.clone(),
                clipboard: cmd.clipboard,
                diff: cmd.diff,
                output_path: cmd.output.clone(),
                no_summary: cmd.no_summary,
                quiet: cli.quiet,
            };
            run_sanitize(engine.as_ref(), opts, theme)
        }
        Commands::Scan(cmd) => {
            let engine = build_engine(&cmd.profile_args)?;
            let input = read_input(cmd.profile_args.input_file.as_deref(), theme, cli.quiet || cmd.json_stdout)?;
            let opts = ScanOptions {
                input,
                language: cmd.profile_args.lang.clone(),
                profile_name: cmd.profile_args.profile.clone(),
                json_file: cmd.json_file.clone(),
                json_stdout: cmd.json_stdout,
                fail_over_threshold: cmd.fail_over_threshold,
                quiet: cli.quiet,
            };
            run_scan(engine.as_ref(), opts, theme)
        }
        Commands::Profiles(cmd) => commands::profiles::run_profiles(&cmd, theme, cli.quiet),
    }
}
