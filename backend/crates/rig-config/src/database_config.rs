use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BUSY_TIMEOUT_SECS, DEFAULT_DATABASE_PATH,
    DEFAULT_MAX_CONNECTIONS, MAX_BUSY_TIMEOUT_SECS, MAX_MAX_CONNECTIONS,
};

use std::time::Duration;

use serde::Deserialize;

/// Location and tuning of the shared SQLite database
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    /// Seconds a statement waits for another writer before failing
    pub busy_timeout_secs: u64,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_DATABASE_PATH),
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::database("database.path must not be empty"));
        }

        if self.busy_timeout_secs == 0 || self.busy_timeout_secs > MAX_BUSY_TIMEOUT_SECS {
            return Err(ConfigError::database(format!(
                "database.busy_timeout_secs must be 1-{}, got {}",
                MAX_BUSY_TIMEOUT_SECS, self.busy_timeout_secs
            )));
        }

        if self.max_connections == 0 || self.max_connections > MAX_MAX_CONNECTIONS {
            return Err(ConfigError::database(format!(
                "database.max_connections must be 1-{}, got {}",
                MAX_MAX_CONNECTIONS, self.max_connections
            )));
        }

        Ok(())
    }
}
