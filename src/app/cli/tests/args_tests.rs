//! Tests for CLI argument parsing

use crate::app::cli::args::Args;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_platform_flags_map_to_selection() {
    let args = Args::parse_from(["scopewatch", "--hackerone", "--intigriti"]);
    let selection = args.selection();

    assert!(selection.hackerone);
    assert!(!selection.bugcrowd);
    assert!(selection.intigriti);
    assert!(selection.any_enabled());
}

#[test]
fn test_no_platform_flags_selects_nothing() {
    let args = Args::parse_from(["scopewatch"]);
    assert!(!args.selection().any_enabled());
}

#[test]
fn test_skip_vdp_and_creds_file() {
    let args = Args::parse_from([
        "scopewatch",
        "--bugcrowd",
        "--skip-vdp",
        "--creds-file",
        "/tmp/creds.toml",
    ]);

    assert!(args.skip_vdp);
    assert_eq!(args.creds_file, Some(PathBuf::from("/tmp/creds.toml")));
}

#[test]
fn test_timeout_default_and_override() {
    let args = Args::parse_from(["scopewatch", "--hackerone"]);
    assert_eq!(args.timeout, 300);

    let args = Args::parse_from(["scopewatch", "--hackerone", "--timeout", "30"]);
    assert_eq!(args.timeout, 30);
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = Args::try_parse_from(["scopewatch", "--log-level", "verbose"]);
    assert!(result.is_err());
}

#[test]
fn test_explicit_data_dir_wins_over_default() {
    let args = Args::parse_from(["scopewatch", "--hackerone", "--data-dir", "/var/lib/sw"]);
    assert_eq!(args.resolved_data_dir(), PathBuf::from("/var/lib/sw"));
}

#[test]
fn test_color_flags_override_each_other() {
    let args = Args::parse_from(["scopewatch", "--color", "--no-color"]);
    assert!(!args.color);
    assert!(args.no_color);
}
