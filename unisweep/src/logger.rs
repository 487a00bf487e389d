// unisweep/src/logger.rs
//! Logger initialization for the unisweep binary.
//!
//! Logs go to stderr so they never mix with cleaned output on stdout.
//! `RUST_LOG` is honored unless an explicit level is passed.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`. Safe to call more than once; later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}

/// The level implied by the `--quiet` and `--debug` flags, if either is set.
/// `--quiet` wins.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
