use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    fn generic<S: Into<String>>(category: &'static str, message: S) -> Self {
        ConfigError::Generic {
            category,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create an agent loop error
    #[track_caller]
    pub fn agent<S: Into<String>>(message: S) -> Self {
        Self::generic("Agent", message)
    }

    /// Create a database error
    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::generic("Database", message)
    }

    /// Create a status probe error
    #[track_caller]
    pub fn probe<S: Into<String>>(message: S) -> Self {
        Self::generic("Probe", message)
    }

    /// Create a service manager error
    #[track_caller]
    pub fn service<S: Into<String>>(message: S) -> Self {
        Self::generic("Service", message)
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
