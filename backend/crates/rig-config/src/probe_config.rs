use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_PROBE_URL,
    MAX_PROBE_TIMEOUT_MS, MIN_PROBE_TIMEOUT_MS,
};

use std::time::Duration;

use serde::Deserialize;

/// Local status endpoint of the workload process
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub url: String,
    pub timeout_ms: u64,
    /// Sent as `Authorization: Bearer <token>` when the endpoint is protected
    pub access_token: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_PROBE_URL),
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            access_token: None,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::probe(format!(
                "probe.url must be an http(s) URL, got '{}'",
                self.url
            )));
        }

        if !(MIN_PROBE_TIMEOUT_MS..=MAX_PROBE_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::probe(format!(
                "probe.timeout_ms must be {}-{}, got {}",
                MIN_PROBE_TIMEOUT_MS, MAX_PROBE_TIMEOUT_MS, self.timeout_ms
            )));
        }

        Ok(())
    }
}
