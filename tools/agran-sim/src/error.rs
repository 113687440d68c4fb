use std::path::PathBuf;
use std::process::ExitCode;

use agran_kernel::error::ConfigError;

/// All errors produced by agran-sim. Each one stops the run before or
/// outside the kernel loop; nothing the operator types is an error here.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(ConfigError),

    #[error("Logger already installed: {0}")]
    Logger(log::SetLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::InvalidConfig(e)
    }
}

// `SetLoggerError` is only a `std::error::Error` with log's `std` feature.
impl From<log::SetLoggerError> for SimError {
    fn from(e: log::SetLoggerError) -> Self {
        SimError::Logger(e)
    }
}

impl SimError {
    /// Every failure is an infrastructure error (exit code 2).
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Read { .. }
            | Self::ConfigParse { .. }
            | Self::InvalidConfig(_)
            | Self::Logger(_)
            | Self::Io(_) => ExitCode::from(2),
        }
    }
}
