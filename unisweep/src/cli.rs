// unisweep/src/cli.rs
//! Command-line interface definition for the unisweep application.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use unisweep_core::EMOJI_SAFE;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "unisweep",
    version = env!("CARGO_PKG_VERSION"),
    about = "Remove invisible, control and spoofing characters from text",
    long_about = "unisweep cleans untrusted Unicode text. It strips zero-width characters, bidirectional overrides, tag characters, stray variation selectors, private-use and non-character code points, orphaned combining marks and (optionally) HTML or Markdown, then normalizes the result. Emoji sequences and script-specific joiners are kept according to the selected profile and language.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cleans an input file or stdin and writes the result.
    #[command(about = "Cleans an input file or stdin and writes the result.")]
    Sanitize(SanitizeCommand),

    /// Reports what would be removed, without printing the cleaned text.
    #[command(about = "Reports what would be removed, without printing the cleaned text.")]
    Scan(ScanCommand),

    /// Lists, shows and validates cleaning profiles.
    #[command(subcommand, about = "Lists, shows and validates cleaning profiles.")]
    Profiles(ProfilesCommand),
}

/// Input and profile options shared by `sanitize` and `scan`.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(
        long = "profile",
        short = 'p',
        value_name = "NAME|PATH",
        default_value = EMOJI_SAFE,
        env = "UNISWEEP_PROFILE",
        help = "Preset name, profile name in the search directories, or path to a JSON profile."
    )]
    pub profile: String,

    #[arg(long = "lang", short = 'l', value_name = "TAG", help = "Language tag selecting a language override (e.g. 'ar', 'th', 'hi-IN').")]
    pub lang: Option<String>,

    #[arg(
        long = "allow",
        value_name = "CP",
        value_delimiter = ',',
        help = "Extra code points to keep, comma-separated (U+200D, 0x200D or a literal character)."
    )]
    pub allow: Vec<String>,

    #[arg(long = "keep-newlines", help = "Keep line feeds and tabs, which are control characters.")]
    pub keep_newlines: bool,
}

#[derive(Args, Debug)]
pub struct SanitizeCommand {
    #[command(flatten)]
    pub profile_args: ProfileArgs,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(long, short = 'c', help = "Copy cleaned output to the system clipboard.")]
    pub clipboard: bool,

    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    #[arg(long = "no-summary", help = "Suppress the removal summary.")]
    pub no_summary: bool,
}

#[derive(Args, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub profile_args: ProfileArgs,

    #[arg(
        long = "fail-over-threshold",
        value_name = "N",
        help = "Exit with a non-zero code if more than N code points would be removed."
    )]
    pub fail_over_threshold: Option<usize>,

    #[arg(long = "json-file", value_name = "FILE", help = "Export the scan report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the scan report to stdout as JSON.")]
    pub json_stdout: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    #[command(about = "Lists built-in presets and profiles found in the search directories.")]
    List,

    #[command(about = "Prints a profile as JSON.")]
    Show {
        #[arg(value_name = "NAME|PATH", help = "Preset name, profile name, or path to a JSON profile.")]
        name: String,
    },

    #[command(about = "Validates a JSON profile file.")]
    Validate {
        #[arg(value_name = "FILE", help = "The path to the profile JSON file to validate.")]
        path: PathBuf,
    },
}
