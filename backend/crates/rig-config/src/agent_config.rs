use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BACKOFF_INTERVAL_SECS, DEFAULT_MAX_COMMANDS_PER_CYCLE,
    DEFAULT_POLL_INTERVAL_SECS, MAX_INTERVAL_SECS, MAX_MAX_COMMANDS_PER_CYCLE, MIN_INTERVAL_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Main loop timing and identity
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Name of the process-state row this agent owns. Defaults to the OS hostname.
    pub hostname: Option<String>,
    /// Sleep between successful cycles
    pub poll_interval_secs: u64,
    /// Sleep after a failed cycle
    pub backoff_interval_secs: u64,
    /// Upper bound on commands claimed in one cycle
    pub max_commands_per_cycle: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            hostname: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            backoff_interval_secs: DEFAULT_BACKOFF_INTERVAL_SECS,
            max_commands_per_cycle: DEFAULT_MAX_COMMANDS_PER_CYCLE,
        }
    }
}

impl AgentConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn backoff_interval(&self) -> Duration {
        Duration::from_secs(self.backoff_interval_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref hostname) = self.hostname
            && hostname.trim().is_empty()
        {
            return Err(ConfigError::agent("agent.hostname must not be blank"));
        }

        for (name, value) in [
            ("agent.poll_interval_secs", self.poll_interval_secs),
            ("agent.backoff_interval_secs", self.backoff_interval_secs),
        ] {
            if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&value) {
                return Err(ConfigError::agent(format!(
                    "{} must be {}-{}, got {}",
                    name, MIN_INTERVAL_SECS, MAX_INTERVAL_SECS, value
                )));
            }
        }

        if self.max_commands_per_cycle == 0
            || self.max_commands_per_cycle > MAX_MAX_COMMANDS_PER_CYCLE
        {
            return Err(ConfigError::agent(format!(
                "agent.max_commands_per_cycle must be 1-{}, got {}",
                MAX_MAX_COMMANDS_PER_CYCLE, self.max_commands_per_cycle
            )));
        }

        Ok(())
    }
}
