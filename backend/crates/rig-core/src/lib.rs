pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult};
pub use models::command::{Command, NewCommand};
pub use models::command_action::CommandAction;
pub use models::command_result::CommandResult;
pub use models::command_status::CommandStatus;
pub use models::health_snapshot::HealthSnapshot;
pub use models::process_state::ProcessState;
pub use models::process_state_update::ProcessStateUpdate;
pub use models::process_status::ProcessStatus;

pub use error_location::ErrorLocation;

use std::panic::Location;

use chrono::{DateTime, Utc};

/// Reason recorded on commands created by an operator rather than the agent.
pub const MANUAL_REASON: &str = "manual";

/// Prefix for reasons of commands the agent enqueues on its own.
pub const HEALTH_CHECK_FAILED_PREFIX: &str = "health_check_failed";

/// Convert a stored unix timestamp (seconds) back into a `DateTime<Utc>`.
#[track_caller]
pub fn parse_timestamp(value: i64, field: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0).ok_or_else(|| CoreError::InvalidTimestamp {
        field: field.to_string(),
        value,
        location: ErrorLocation::from(Location::caller()),
    })
}
