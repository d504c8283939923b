use crate::{AgentResult, Decision, ProbeOutcome, UnhealthyReason};

use rig_core::{NewCommand, ProcessStateUpdate, ProcessStatus};
use rig_db::{ClaimScope, StateStore};

use chrono::Utc;
use log::{debug, info, warn};

/// Classify one observation.
///
/// Rules, first match wins:
/// 1. unreachable while the unit is active: `api_not_responding`
/// 2. unreachable while the unit is inactive: healthy, stopped
/// 3. snapshot reporting zero hashrate: `zero_hashrate`
/// 4. anything else: healthy, running
pub fn evaluate(outcome: &ProbeOutcome, service_active: bool) -> Decision {
    match outcome {
        ProbeOutcome::Unreachable { .. } if service_active => {
            Decision::Unhealthy(UnhealthyReason::ApiNotResponding)
        }
        ProbeOutcome::Unreachable { .. } => Decision::Healthy {
            observed: ProcessStatus::Stopped,
        },
        ProbeOutcome::Snapshot(snapshot) if snapshot.has_zero_hashrate() => {
            Decision::Unhealthy(UnhealthyReason::ZeroHashrate)
        }
        ProbeOutcome::Snapshot(_) => Decision::Healthy {
            observed: ProcessStatus::Running,
        },
    }
}

/// Persists each health observation and enqueues a restart whenever it is unhealthy.
///
/// There is no debounce, cooldown or cap: every unhealthy evaluation produces
/// exactly one restart command.
#[derive(Clone)]
pub struct SelfHealingPolicy {
    store: StateStore,
    hostname: String,
}

impl SelfHealingPolicy {
    pub fn new(store: StateStore, hostname: impl Into<String>) -> Self {
        Self {
            store,
            hostname: hostname.into(),
        }
    }

    pub async fn enforce(
        &self,
        outcome: &ProbeOutcome,
        service_active: bool,
    ) -> AgentResult<Decision> {
        let decision = evaluate(outcome, service_active);
        let now = Utc::now();

        let update = match decision {
            Decision::Healthy {
                observed: ProcessStatus::Stopped,
            } => {
                let previous = self.store.find_process_state(&self.hostname).await?;
                let update = ProcessStateUpdate::status(ProcessStatus::Stopped).health_checked_at(now);
                match previous {
                    Some(state) if state.status == ProcessStatus::Stopped => update,
                    _ => {
                        info!("{}: workload is stopped", self.hostname);
                        update.stopped_at(now)
                    }
                }
            }
            Decision::Healthy { observed } => {
                let mut update = ProcessStateUpdate::status(observed).health_checked_at(now);
                if let Some(snapshot) = outcome.snapshot() {
                    update = update.with_snapshot(snapshot);
                }
                debug!("{}: healthy ({})", self.hostname, observed);
                update
            }
            Decision::Unhealthy(reason) => {
                let command = self.restart_command(reason);
                let inserted = self.store.insert_command(&command).await?;
                warn!(
                    "{}: unhealthy ({}), enqueued restart command {}",
                    self.hostname, reason, inserted.id
                );

                let mut update = ProcessStateUpdate::status(ProcessStatus::Unhealthy)
                    .health_checked_at(now)
                    .with_error(reason.as_str())
                    .with_restart();
                if let Some(snapshot) = outcome.snapshot() {
                    update = update.with_snapshot(snapshot);
                }
                update
            }
        };

        self.store
            .upsert_process_state(&self.hostname, &update)
            .await?;

        Ok(decision)
    }

    fn restart_command(&self, reason: UnhealthyReason) -> NewCommand {
        let command = NewCommand::health_restart(reason.as_str());
        match self.store.scope() {
            ClaimScope::Host(_) => command.for_host(self.hostname.as_str()),
            ClaimScope::Any => command,
        }
    }
}
