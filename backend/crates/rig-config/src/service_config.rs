use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_SERVICE_UNIT,
    DEFAULT_SYSTEMCTL_PATH, DEFAULT_USE_SUDO, MAX_COMMAND_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Service-manager unit that runs the workload
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub unit: String,
    pub systemctl_path: String,
    /// Prefix calls with `sudo -n` (the installer grants exactly these subcommands)
    pub use_sudo: bool,
    pub command_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            unit: String::from(DEFAULT_SERVICE_UNIT),
            systemctl_path: String::from(DEFAULT_SYSTEMCTL_PATH),
            use_sudo: DEFAULT_USE_SUDO,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.unit.is_empty() || self.unit.chars().any(char::is_whitespace) {
            return Err(ConfigError::service(format!(
                "service.unit must be a single non-empty word, got '{}'",
                self.unit
            )));
        }

        if self.systemctl_path.trim().is_empty() {
            return Err(ConfigError::service("service.systemctl_path must not be empty"));
        }

        if self.command_timeout_secs == 0 || self.command_timeout_secs > MAX_COMMAND_TIMEOUT_SECS {
            return Err(ConfigError::service(format!(
                "service.command_timeout_secs must be 1-{}, got {}",
                MAX_COMMAND_TIMEOUT_SECS, self.command_timeout_secs
            )));
        }

        Ok(())
    }
}
