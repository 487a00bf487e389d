// unisweep/src/main.rs
//! unisweep entry point.

use clap::Parser;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;

use unisweep::cli::Cli;
use unisweep::logger;
use unisweep::ui::theme::{ThemeMap, ThemeStyle};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    // A theme that fails to load cannot style its own error.
    let theme = match unisweep::load_theme(&cli) {
        Ok(theme) => theme,
        Err(e) => return fail(&e, &ThemeStyle::default_theme_map()),
    };

    match unisweep::run(cli, &theme) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e, &theme),
    }
}

fn fail(err: &anyhow::Error, theme: &ThemeMap) -> ExitCode {
    let stderr = io::stderr();
    let use_color = stderr.is_terminal();
    let _ = unisweep::report_error(err, &mut stderr.lock(), theme, use_color);
    ExitCode::FAILURE
}
