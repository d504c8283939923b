mod agent_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod probe_config;
mod queue_config;
mod service_config;

#[cfg(test)]
mod tests;

pub use agent_config::AgentConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use probe_config::ProbeConfig;
pub use queue_config::QueueConfig;
pub use service_config::ServiceConfig;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "RIG_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "/etc/rig-agent/config.toml";

// Agent loop
const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
const DEFAULT_BACKOFF_INTERVAL_SECS: u64 = 30;
const MIN_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 3600;
const DEFAULT_MAX_COMMANDS_PER_CYCLE: u32 = 1;
const MAX_MAX_COMMANDS_PER_CYCLE: u32 = 100;

// Database
const DEFAULT_DATABASE_PATH: &str = "/var/lib/rig-agent/rig.db";
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;
const MAX_BUSY_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_CONNECTIONS: u32 = 4;
const MAX_MAX_CONNECTIONS: u32 = 64;

// Status probe
const DEFAULT_PROBE_URL: &str = "http://127.0.0.1:8080/summary";
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;
const MIN_PROBE_TIMEOUT_MS: u64 = 100;
const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;

// Service manager
const DEFAULT_SERVICE_UNIT: &str = "xmrig";
const DEFAULT_SYSTEMCTL_PATH: &str = "systemctl";
const DEFAULT_USE_SUDO: bool = true;
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;
const MAX_COMMAND_TIMEOUT_SECS: u64 = 600;

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
