use crate::{HealthSnapshot, ProcessStatus};

use chrono::{DateTime, Utc};

/// Partial change applied to a host's process-state row.
///
/// `None` fields keep the stored value. Counters can only be incremented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessStateUpdate {
    pub status: Option<ProcessStatus>,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub last_health_check_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub hashrate: Option<f64>,
    pub accepted_shares: Option<i64>,
    pub rejected_shares: Option<i64>,
    pub health_data: Option<String>,
    pub error_increment: u32,
    pub restart_increment: u32,
}

impl ProcessStateUpdate {
    pub fn status(status: ProcessStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = Some(at);
        self
    }

    pub fn stopped_at(mut self, at: DateTime<Utc>) -> Self {
        self.stopped_at = Some(at);
        self
    }

    pub fn health_checked_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_health_check_at = Some(at);
        self
    }

    pub fn with_snapshot(mut self, snapshot: &HealthSnapshot) -> Self {
        self.hashrate = Some(snapshot.total_hashrate);
        self.accepted_shares = Some(snapshot.accepted_shares);
        self.rejected_shares = Some(snapshot.rejected_shares);
        self.health_data = Some(snapshot.raw.clone());
        self
    }

    /// Record a failure: sets `last_error` and bumps `error_count`
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.last_error = Some(message.into());
        self.error_increment += 1;
        self
    }

    /// Bump `restart_count`
    pub fn with_restart(mut self) -> Self {
        self.restart_increment += 1;
        self
    }
}
