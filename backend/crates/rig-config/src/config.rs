use crate::{
    AgentConfig, CONFIG_PATH_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_PATH,
    DatabaseConfig, LoggingConfig, ProbeConfig, QueueConfig, ServiceConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub agent: AgentConfig,
    pub database: DatabaseConfig,
    pub probe: ProbeConfig,
    pub service: ServiceConfig,
    pub queue: QueueConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from an explicit file or the default location.
    ///
    /// Loading order:
    /// 1. `explicit` (the `--config` flag), else `RIG_CONFIG` env var, else
    ///    /etc/rig-agent/config.toml
    /// 2. Parse the file if it exists, else use defaults
    /// 3. Apply RIG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load_from().
    pub fn load_from(explicit: Option<&Path>) -> ConfigErrorResult<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::config_path(),
        };

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Config file location: RIG_CONFIG env var > /etc/rig-agent/config.toml
    pub fn config_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validate all configuration.
    /// Call after load_from() (and after CLI overrides) to catch errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.agent.validate()?;
        self.database.validate()?;
        self.probe.validate()?;
        self.service.validate()?;
        Ok(())
    }

    /// Log configuration summary (never logs the probe access token).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  agent: host={}, poll={}s, backoff={}s, max_commands={}",
            self.agent.hostname.as_deref().unwrap_or("<os hostname>"),
            self.agent.poll_interval_secs,
            self.agent.backoff_interval_secs,
            self.agent.max_commands_per_cycle
        );
        info!(
            "  database: {} (busy_timeout={}s, max_connections={})",
            self.database.path, self.database.busy_timeout_secs, self.database.max_connections
        );
        info!(
            "  probe: {} (timeout={}ms, auth={})",
            self.probe.url,
            self.probe.timeout_ms,
            if self.probe.access_token.is_some() {
                "bearer"
            } else {
                "none"
            }
        );
        info!(
            "  service: unit={}, systemctl={}, sudo={}, timeout={}s",
            self.service.unit,
            self.service.systemctl_path,
            self.service.use_sudo,
            self.service.command_timeout_secs
        );
        info!(
            "  queue: {}",
            if self.queue.scope_to_host {
                "host-scoped"
            } else {
                "shared"
            }
        );
        info!(
            "  logging: {} ({})",
            *self.logging.level,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Agent
        Self::apply_env_option_string("RIG_HOSTNAME", &mut self.agent.hostname);
        Self::apply_env_parse(
            "RIG_POLL_INTERVAL_SECS",
            &mut self.agent.poll_interval_secs,
        );
        Self::apply_env_parse(
            "RIG_BACKOFF_INTERVAL_SECS",
            &mut self.agent.backoff_interval_secs,
        );
        Self::apply_env_parse(
            "RIG_MAX_COMMANDS_PER_CYCLE",
            &mut self.agent.max_commands_per_cycle,
        );

        // Database
        Self::apply_env_string("RIG_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "RIG_DATABASE_BUSY_TIMEOUT_SECS",
            &mut self.database.busy_timeout_secs,
        );
        Self::apply_env_parse(
            "RIG_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Probe
        Self::apply_env_string("RIG_HEALTH_URL", &mut self.probe.url);
        Self::apply_env_parse("RIG_PROBE_TIMEOUT_MS", &mut self.probe.timeout_ms);
        Self::apply_env_option_string("RIG_PROBE_ACCESS_TOKEN", &mut self.probe.access_token);

        // Service
        Self::apply_env_string("RIG_SERVICE_UNIT", &mut self.service.unit);
        Self::apply_env_string("RIG_SYSTEMCTL_PATH", &mut self.service.systemctl_path);
        Self::apply_env_bool("RIG_USE_SUDO", &mut self.service.use_sudo);
        Self::apply_env_parse(
            "RIG_COMMAND_TIMEOUT_SECS",
            &mut self.service.command_timeout_secs,
        );

        // Queue
        Self::apply_env_bool("RIG_SCOPE_TO_HOST", &mut self.queue.scope_to_host);

        // Logging
        Self::apply_env_parse("RIG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_option_string("RIG_LOG_FILE", &mut self.logging.file);
        Self::apply_env_bool("RIG_LOG_COLORED", &mut self.logging.colored);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
