// unisweep/tests/cli_integration_tests.rs
//! Command-line integration tests for the `unisweep` binary.
//!
//! The binary is run with `assert_cmd`, input is fed through stdin or
//! temporary files, and stderr is compared after stripping ANSI escapes.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn unisweep() -> Command {
    let mut cmd = Command::cargo_bin("unisweep").unwrap();
    cmd.env_remove("UNISWEEP_PROFILE");
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn run_unisweep(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = unisweep();
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    cmd.assert()
}

fn strip_ansi(s: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(s)).to_string()
}

#[test]
fn test_basic_sanitization() -> Result<()> {
    let assert = run_unisweep("pay\u{200B}pal \u{1F600}\u{FE0F}", &["sanitize"]).success();
    let output = assert.get_output();
    assert_eq!(String::from_utf8(output.stdout.clone())?, "paypal \u{1F600}\u{FE0F}\n");

    let stderr = strip_ansi(&output.stderr);
    assert!(stderr.contains("Reading input from stdin..."), "stderr: {}", stderr);
    assert!(stderr.contains("--- Removal Summary ---"));
    assert!(stderr.contains("cf_format"));
    assert!(stderr.contains("U+200B"));
    assert!(stderr.contains("Starting sanitize operation."));
    Ok(())
}

#[test]
fn test_input_content_never_logged() -> Result<()> {
    let secret = "s3cr3t-token\u{200B}";
    let assert = run_unisweep(secret, &["sanitize", "--no-summary"]).success();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(!stderr.contains("s3cr3t-token"));
    Ok(())
}

#[test]
fn test_quiet_suppresses_stderr() {
    run_unisweep("a\u{202E}b", &["-q", "sanitize"])
        .success()
        .stdout("ab\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_language_override() {
    let arabic = "\u{0644}\u{200D}\u{0645}";
    run_unisweep(arabic, &["-q", "sanitize", "--lang", "ar"])
        .success()
        .stdout(format!("{}\n", arabic));
    run_unisweep(arabic, &["-q", "sanitize"])
        .success()
        .stdout("\u{0644}\u{0645}\n");
}

#[test]
fn test_markup_intact_profile() {
    run_unisweep("<b>bo\u{200B}ld</b>", &["-q", "sanitize", "--profile", "markup_intact"])
        .success()
        .stdout("<b>bold</b>\n");
    run_unisweep("<b>bo\u{200B}ld</b>", &["-q", "sanitize"])
        .success()
        .stdout("bold\n");
}

#[test]
fn test_allow_and_keep_newlines() {
    run_unisweep("a\u{200B}b\nc", &["-q", "sanitize", "--allow", "U+200B", "--keep-newlines"])
        .success()
        .stdout("a\u{200B}b\nc\n");
    run_unisweep("a\u{200B}b\nc", &["-q", "sanitize"])
        .success()
        .stdout("abc\n");
}

#[test]
fn test_invalid_allow_value_fails() {
    unisweep()
        .args(["sanitize", "--allow", "U+ZZZZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --allow value 'U+ZZZZ'"));
}

#[test]
fn test_output_to_file() -> Result<()> {
    let out = NamedTempFile::new()?;
    let path = out.path().to_str().unwrap().to_string();
    run_unisweep("x\u{FEFF}y", &["sanitize", "-o", &path]).success().stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(&path)?, "xy\n");
    Ok(())
}

#[test]
fn test_input_from_file() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    write!(input, "tag\u{E0041}\u{E0042}ged")?;
    let path = input.path().to_str().unwrap().to_string();
    let assert = unisweep().args(["sanitize", "-i", &path]).assert().success().stdout("tagged\n");
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("Reading input from file:"));
    Ok(())
}

#[test]
fn test_utf16_input_with_lone_surrogate() -> Result<()> {
    let mut input = NamedTempFile::new()?;
    // BOM, 'h', lone high surrogate, 'i'
    input.write_all(&[0xFF, 0xFE, b'h', 0x00, 0x00, 0xD8, b'i', 0x00])?;
    let path = input.path().to_str().unwrap().to_string();
    let assert = unisweep().args(["sanitize", "-i", &path]).assert().success().stdout("hi\n");
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("cs_surrogate"));
    Ok(())
}

#[test]
fn test_diff_view() {
    let assert = run_unisweep("keep\npay\u{200B}pal", &["-q", "sanitize", "--diff", "--keep-newlines"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("--- Diff View ---"));
    assert!(stdout.contains("-pay<U+200B>pal"));
    assert!(stdout.contains("+paypal"));
}

#[test]
fn test_custom_profile_file() -> Result<()> {
    let mut profile = NamedTempFile::new()?;
    write!(
        profile,
        r#"{{ "version": "1", "remove_categories": {{ "Cf_format_controls": true }}, "hard_allowlist": ["U+200D"] }}"#
    )?;
    let path = profile.path().to_str().unwrap().to_string();
    run_unisweep("a\u{200B}\u{200D}b\u{E000}", &["-q", "sanitize", "-p", &path])
        .success()
        .stdout("a\u{200D}b\u{E000}\n");
    Ok(())
}

#[test]
fn test_unknown_profile_fails() {
    unisweep()
        .args(["sanitize", "--profile", "no_such_profile_71c2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load profile 'no_such_profile_71c2'"));
}

#[test]
fn test_scan_json_stdout() -> Result<()> {
    let assert = run_unisweep("a\u{200B}\u{200B}b\u{FE01}", &["scan", "--json-stdout"]).success();
    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(json["profile"], "emoji_safe");
    assert_eq!(json["total_removed_by_rules"], 3);
    assert_eq!(json["stats"]["original_chars"], 5);
    assert_eq!(json["removals"][0]["rule_name"], "cf_format");
    assert_eq!(json["removals"][0]["occurrences"], 2);
    assert_eq!(json["removals"][1]["rule_name"], "variation_selector");
    assert_eq!(json["profile_fingerprint"].as_str().map(str::len), Some(64));
    Ok(())
}

#[test]
fn test_scan_json_file() -> Result<()> {
    let out = NamedTempFile::new()?;
    let path = out.path().to_str().unwrap().to_string();
    let assert = run_unisweep("x\u{202E}y", &["scan", "--json-file", &path]).success();
    assert!(assert.get_output().stdout.is_empty());
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(json["total_removed_by_rules"], 1);
    Ok(())
}

#[test]
fn test_scan_threshold() {
    run_unisweep("a\u{200B}b", &["scan", "--fail-over-threshold", "1"]).success();
    run_unisweep("a\u{200B}\u{200C}b", &["scan", "--fail-over-threshold", "1"])
        .failure()
        .stderr(predicate::str::contains("2 code points would be removed, exceeding the threshold of 1"));
}

#[test]
fn test_scan_json_flags_conflict() {
    unisweep().args(["scan", "--json-stdout", "--json-file", "out.json"]).assert().failure();
}

#[test]
fn test_profiles_list_and_show() -> Result<()> {
    unisweep()
        .args(["profiles", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("emoji_safe").and(predicate::str::contains("max_sterile")));

    let assert = unisweep().args(["profiles", "show", "emoji_safe"]).assert().success();
    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(json["strip_variation_selectors"], "emoji_safekeep");
    assert_eq!(json["language_overrides"]["th"]["allow"][0], "U+200B");
    Ok(())
}

#[test]
fn test_profiles_validate() -> Result<()> {
    let mut good = NamedTempFile::new()?;
    write!(good, r#"{{ "version": "3", "collapse_whitespace": true }}"#)?;
    let good_path = good.path().to_str().unwrap().to_string();
    let assert = unisweep().args(["profiles", "validate", &good_path]).assert().success();
    assert!(strip_ansi(&assert.get_output().stderr).contains("is valid (version 3"));

    let mut bad = NamedTempFile::new()?;
    write!(bad, r#"{{ "version": "3", "remove_private_use": "planes" }}"#)?;
    let bad_path = bad.path().to_str().unwrap().to_string();
    unisweep()
        .args(["profiles", "validate", &bad_path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is invalid"));
    Ok(())
}

#[test]
fn test_custom_theme_file() -> Result<()> {
    let mut theme = NamedTempFile::new()?;
    writeln!(theme, "header:\n  fg: blue")?;
    let theme_path = theme.path().to_str().unwrap().to_string();
    run_unisweep("x", &["--theme", &theme_path, "sanitize"]).success().stdout("x\n");

    let mut bad = NamedTempFile::new()?;
    writeln!(bad, "header:\n  fg: octarine")?;
    let bad_path = bad.path().to_str().unwrap().to_string();
    unisweep()
        .args(["--theme", &bad_path, "sanitize"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load theme"));
    Ok(())
}
