use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Run the AGRAN kernel's shell loop on the host.
#[derive(Parser, Debug)]
#[command(name = "agran-sim", version, about)]
pub struct Cli {
    /// Kernel configuration file (TOML). Missing keys keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read command lines from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Render into the 80x25 text screen and print it on exit.
    #[arg(long)]
    pub screen: bool,

    /// Kernel log level, written to stderr.
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
