use crate::{CommandAction, CommandStatus, HEALTH_CHECK_FAILED_PREFIX, MANUAL_REASON};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the shared command queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: i64,
    pub action: CommandAction,
    pub status: CommandStatus,
    pub reason: Option<String>,

    // Outcome
    pub result: Option<String>,
    pub error_message: Option<String>,

    /// Host the command is addressed to. `None` means any agent may claim it.
    pub target_host: Option<String>,

    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// A command about to be enqueued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    pub action: CommandAction,
    pub reason: String,
    pub target_host: Option<String>,
}

impl NewCommand {
    pub fn new(action: CommandAction, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
            target_host: None,
        }
    }

    /// Operator-issued command, claimable by any agent
    pub fn manual(action: CommandAction) -> Self {
        Self::new(action, MANUAL_REASON)
    }

    /// Restart requested by the agent after a failed health check.
    ///
    /// Produces reasons like `health_check_failed:zero_hashrate`.
    pub fn health_restart(cause: &str) -> Self {
        Self::new(
            CommandAction::Restart,
            format!("{HEALTH_CHECK_FAILED_PREFIX}:{cause}"),
        )
    }

    pub fn for_host(mut self, hostname: impl Into<String>) -> Self {
        self.target_host = Some(hostname.into());
        self
    }
}
