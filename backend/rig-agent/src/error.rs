use rig_config::ConfigError;
use rig_db::DbError;

use std::any::Any;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Config error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Db {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Failed to spawn {program}: {source} {location}")]
    ControllerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("{action} did not finish within {timeout_secs}s {location}")]
    ControllerTimeout {
        action: String,
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Failed to build HTTP client: {source} {location}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Failed to open log file {path}: {source} {location}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to initialize logger: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Could not determine hostname: {message} {location}")]
    Hostname {
        message: String,
        location: ErrorLocation,
    },

    #[error("Cycle panicked: {message} {location}")]
    CyclePanicked {
        message: String,
        location: ErrorLocation,
    },
}

impl AgentError {
    #[track_caller]
    pub fn hostname(message: impl Into<String>) -> Self {
        Self::Hostname {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn controller_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::ControllerSpawn {
            program: program.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn controller_timeout(action: impl Into<String>, timeout_secs: u64) -> Self {
        Self::ControllerTimeout {
            action: action.into(),
            timeout_secs,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn cycle_panicked(message: impl Into<String>) -> Self {
        Self::CyclePanicked {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Errors expected to clear up on their own (locked database, slow service manager)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Db { source, .. } => matches!(source, DbError::Sqlx { .. }),
            Self::ControllerTimeout { .. } => true,
            _ => false,
        }
    }
}

impl From<ConfigError> for AgentError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        Self::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for AgentError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Db {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Text of a caught panic payload
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("non-string panic payload")
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
