use crate::probe::summary::parse_summary;
use crate::{AgentError, AgentResult, ProbeOutcome};

use rig_config::ProbeConfig;
use rig_core::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use log::debug;

/// Bounded-timeout reader of the workload's local status endpoint
pub struct StatusProbe {
    client: reqwest::Client,
    url: String,
    access_token: Option<String>,
    timeout: Duration,
}

impl StatusProbe {
    #[track_caller]
    pub fn new(config: &ProbeConfig) -> AgentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(1)
            .build()
            .map_err(|source| AgentError::HttpClient {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            access_token: config.access_token.clone(),
            timeout: config.timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One GET against the endpoint. Never fails: every problem is reported as
    /// [`ProbeOutcome::Unreachable`].
    pub async fn read(&self) -> ProbeOutcome {
        let mut request = self.client.get(&self.url);
        if let Some(ref token) = self.access_token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::unreachable(self.describe(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            return ProbeOutcome::unreachable(format!("HTTP {}", status));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ProbeOutcome::unreachable(self.describe(&e)),
        };

        match parse_summary(&body) {
            Some(snapshot) => {
                debug!(
                    "Probe {}: worker={} hashrate={}",
                    self.url, snapshot.worker_id, snapshot.total_hashrate
                );
                ProbeOutcome::Snapshot(snapshot)
            }
            None => ProbeOutcome::unreachable("malformed summary document"),
        }
    }

    fn describe(&self, error: &reqwest::Error) -> String {
        if error.is_timeout() {
            format!("timed out after {}ms", self.timeout.as_millis())
        } else if error.is_connect() {
            format!("connection failed: {}", error)
        } else {
            error.to_string()
        }
    }
}
