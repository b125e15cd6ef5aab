#![forbid(unsafe_code)]

//! Perch error model.
//!
//! Placement itself never fails: degenerate geometry is clamped and a
//! missing anchor just means "not ready yet". Only configuration loading
//! can go wrong.

use std::fmt;
use std::path::PathBuf;

use perch_widgets::ConfigError;

/// Top-level error type for Perch.
#[derive(Debug)]
pub enum Error {
    /// Loading, parsing or validating a [`PerchConfig`](crate::PerchConfig) failed.
    Config(ConfigError),
    /// The config file extension is neither `toml` nor `json`.
    UnsupportedConfigFormat(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::UnsupportedConfigFormat(path) => write!(
                f,
                "unsupported config format: {} (expected .toml or .json)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::UnsupportedConfigFormat(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Config(ConfigError::Io(err))
    }
}

/// Standard result type for Perch APIs.
pub type Result<T> = std::result::Result<T, Error>;
