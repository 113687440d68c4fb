//! Command-line parsing.

use agran_sim::cli::{Cli, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn defaults() {
    let cli = Cli::try_parse_from(["agran-sim"]).unwrap();
    assert!(cli.config.is_none());
    assert!(cli.script.is_none());
    assert!(!cli.screen);
    assert_eq!(cli.log_level, LogLevel::Warn);
}

#[test]
fn all_flags() {
    let cli = Cli::try_parse_from([
        "agran-sim",
        "--config",
        "kernel.toml",
        "--script",
        "boot.txt",
        "--screen",
        "--log-level",
        "trace",
    ])
    .unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("kernel.toml")));
    assert_eq!(cli.script, Some(PathBuf::from("boot.txt")));
    assert!(cli.screen);
    assert_eq!(cli.log_level, LogLevel::Trace);
    assert_eq!(log::LevelFilter::from(cli.log_level), log::LevelFilter::Trace);
}

#[test]
fn unknown_log_level_is_rejected() {
    assert!(Cli::try_parse_from(["agran-sim", "--log-level", "loud"]).is_err());
}
