use crate::{AgentResult, CommandOutcome, ProcessController, panic_message};

use rig_core::{Command, CommandAction, CommandResult, ProcessStateUpdate, ProcessStatus};
use rig_db::StateStore;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use log::{error, info, warn};

const EMPTY_RESULT: &str = "ok";

/// Claims pending commands and carries them out through the [`ProcessController`].
///
/// Failed commands are recorded and left alone; nothing here retries.
pub struct CommandQueueProcessor {
    store: StateStore,
    controller: Arc<dyn ProcessController>,
    hostname: String,
    max_per_cycle: u32,
}

impl CommandQueueProcessor {
    pub fn new(
        store: StateStore,
        controller: Arc<dyn ProcessController>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            store,
            controller,
            hostname: hostname.into(),
            max_per_cycle: 1,
        }
    }

    pub fn with_max_per_cycle(mut self, max_per_cycle: u32) -> Self {
        self.max_per_cycle = max_per_cycle.max(1);
        self
    }

    /// Claim and execute up to `max_per_cycle` commands, oldest first.
    ///
    /// Database errors abort the batch; commands already finished keep their
    /// recorded outcome.
    pub async fn process_pending(&self) -> AgentResult<Vec<CommandOutcome>> {
        let mut outcomes = Vec::new();

        for _ in 0..self.max_per_cycle {
            let Some(command) = self.store.claim_next_command().await? else {
                break;
            };
            outcomes.push(self.execute(&command).await?);
        }

        Ok(outcomes)
    }

    async fn execute(&self, command: &Command) -> AgentResult<CommandOutcome> {
        info!(
            "Claimed command {} ({}, reason={})",
            command.id,
            command.action,
            command.reason.as_deref().unwrap_or("-")
        );

        // From here on the row is ours: every path must end in record_command_outcome
        if command.action == CommandAction::Stop
            && let Err(e) = self
                .store
                .upsert_process_state(
                    &self.hostname,
                    &ProcessStateUpdate::status(ProcessStatus::Stopping),
                )
                .await
        {
            warn!("Could not mark {} as stopping: {}", self.hostname, e);
        }

        let invocation = AssertUnwindSafe(self.controller.execute(command.action))
            .catch_unwind()
            .await;

        let result = match invocation {
            Err(payload) => CommandResult::Failed {
                error_message: format!(
                    "service controller panicked: {}",
                    panic_message(payload.as_ref())
                ),
            },
            Ok(Ok(output)) if output.success() => CommandResult::Completed {
                result: if output.stdout.is_empty() {
                    String::from(EMPTY_RESULT)
                } else {
                    output.stdout
                },
            },
            Ok(Ok(output)) => CommandResult::Failed {
                error_message: output.failure_message(),
            },
            Ok(Err(e)) => CommandResult::Failed {
                error_message: e.to_string(),
            },
        };

        match result {
            CommandResult::Completed { .. } => {
                info!("Command {} ({}) completed", command.id, command.action)
            }
            CommandResult::Failed { ref error_message } => error!(
                "Command {} ({}) failed: {}",
                command.id, command.action, error_message
            ),
        }

        if !self.store.record_command_outcome(command.id, &result).await? {
            warn!(
                "Command {} was no longer processing, outcome not recorded",
                command.id
            );
        }

        self.store
            .upsert_process_state(
                &self.hostname,
                &state_change(command.action, &result, Utc::now()),
            )
            .await?;

        Ok(CommandOutcome {
            command_id: command.id,
            action: command.action,
            result,
        })
    }
}

/// Process-state side effect of a finished command
pub fn state_change(
    action: CommandAction,
    result: &CommandResult,
    now: DateTime<Utc>,
) -> ProcessStateUpdate {
    match (action, result) {
        (CommandAction::Start, CommandResult::Completed { .. }) => {
            ProcessStateUpdate::status(ProcessStatus::Starting).started_at(now)
        }
        (CommandAction::Restart, CommandResult::Completed { .. }) => {
            ProcessStateUpdate::status(ProcessStatus::Restarting).started_at(now)
        }
        (CommandAction::Stop, CommandResult::Completed { .. }) => {
            ProcessStateUpdate::status(ProcessStatus::Stopped).stopped_at(now)
        }
        (CommandAction::Start | CommandAction::Restart, CommandResult::Failed { error_message }) => {
            ProcessStateUpdate::status(ProcessStatus::Crashed).with_error(error_message.as_str())
        }
        (CommandAction::Stop, CommandResult::Failed { error_message }) => {
            ProcessStateUpdate::default().with_error(error_message.as_str())
        }
    }
}
