//! `profiles` command: list, show and validate cleaning profiles.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::Table;
use std::io::{self, Write};
use std::path::Path;

use unisweep_core::{list_available_profiles, load_profile, Profile, ProfileSource};

use crate::cli::ProfilesCommand;
use crate::commands::success_msg;
use crate::ui::theme::ThemeMap;

pub fn run_profiles(cmd: &ProfilesCommand, theme: &ThemeMap, quiet: bool) -> Result<()> {
    match cmd {
        ProfilesCommand::List => list_profiles(&mut io::stdout().lock()),
        ProfilesCommand::Show { name } => show_profile(name, &mut io::stdout().lock()),
        ProfilesCommand::Validate { path } => {
            let profile = validate_profile_file(path)?;
            if !quiet {
                success_msg(
                    format!(
                        "Profile '{}' is valid (version {}, fingerprint {}).",
                        path.display(),
                        profile.version,
                        profile.short_fingerprint()
                    ),
                    theme,
                );
            }
            Ok(())
        }
    }
}

fn list_profiles<W: Write>(writer: &mut W) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(vec!["Name", "Version", "Source"]);
    for summary in list_available_profiles() {
        let source = match &summary.source {
            ProfileSource::Preset => "built-in".to_string(),
            ProfileSource::File(path) => path.display().to_string(),
        };
        table.add_row(vec![summary.name, summary.version, source]);
    }
    writeln!(writer, "{}", table)?;
    Ok(())
}

fn show_profile<W: Write>(name: &str, writer: &mut W) -> Result<()> {
    let profile = load_profile(name).with_context(|| format!("Failed to load profile '{}'", name))?;
    writeln!(writer, "{}", profile.to_json_pretty()?)?;
    Ok(())
}

fn validate_profile_file(path: &Path) -> Result<Profile> {
    Profile::load_from_file(path).with_context(|| format!("Profile '{}' is invalid", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_includes_presets() {
        let mut buf = Vec::new();
        list_profiles(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        for name in unisweep_core::PRESET_NAMES {
            assert!(out.contains(name));
        }
        assert!(out.contains("built-in"));
    }

    #[test]
    fn test_show_prints_json() {
        let mut buf = Vec::new();
        show_profile("max-sterile", &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["nfkc_compat"], true);
        assert_eq!(json["strip_variation_selectors"], "all");
    }

    #[test]
    fn test_validate_rejects_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"version": "1", "normalize": "NFX"}}"#).unwrap();
        assert!(validate_profile_file(file.path()).is_err());
    }
}
