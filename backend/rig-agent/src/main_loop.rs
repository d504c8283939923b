use crate::{
    AgentError, AgentResult, CommandOutcome, CommandQueueProcessor, Decision, ProcessController,
    SelfHealingPolicy, ShutdownCoordinator, StatusProbe, panic_message,
};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use log::{error, info, warn};

/// Where the loop is between cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Backoff,
}

/// What one successful cycle did
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub commands: Vec<CommandOutcome>,
    pub decision: Decision,
}

/// The agent's only long-lived task: process commands, probe, heal, sleep.
pub struct MainLoop {
    processor: CommandQueueProcessor,
    probe: StatusProbe,
    controller: Arc<dyn ProcessController>,
    policy: SelfHealingPolicy,
    poll_interval: Duration,
    backoff_interval: Duration,
    state: LoopState,
}

impl MainLoop {
    pub fn new(
        processor: CommandQueueProcessor,
        probe: StatusProbe,
        controller: Arc<dyn ProcessController>,
        policy: SelfHealingPolicy,
    ) -> Self {
        Self {
            processor,
            probe,
            controller,
            policy,
            poll_interval: Duration::from_secs(10),
            backoff_interval: Duration::from_secs(30),
            state: LoopState::Running,
        }
    }

    pub fn with_intervals(mut self, poll_interval: Duration, backoff_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.backoff_interval = backoff_interval;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// One pass: pending commands first, then the health check.
    pub async fn run_cycle(&self) -> AgentResult<CycleReport> {
        let commands = self.processor.process_pending().await?;
        let outcome = self.probe.read().await;
        let service_active = self.controller.is_active().await;
        let decision = self.policy.enforce(&outcome, service_active).await?;

        Ok(CycleReport { commands, decision })
    }

    /// Run one cycle behind the error/panic boundary and return how long to sleep.
    pub async fn step(&mut self) -> Duration {
        let result = match AssertUnwindSafe(self.run_cycle()).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(AgentError::cycle_panicked(panic_message(payload.as_ref()))),
        };

        match result {
            Ok(_) => {
                if self.state == LoopState::Backoff {
                    info!("Cycle succeeded, leaving backoff");
                }
                self.state = LoopState::Running;
                self.poll_interval
            }
            Err(e) => {
                if e.is_transient() {
                    warn!("Cycle failed (transient): {}", e);
                } else {
                    error!("Cycle failed: {}", e);
                }
                self.state = LoopState::Backoff;
                info!("Backing off for {}s", self.backoff_interval.as_secs());
                self.backoff_interval
            }
        }
    }

    /// Loop until shutdown. A signal never interrupts a cycle; it ends the sleep after it.
    pub async fn run(mut self, shutdown: &ShutdownCoordinator) {
        let mut guard = shutdown.subscribe_guard();
        info!(
            "Main loop started (poll every {}s, back off {}s)",
            self.poll_interval.as_secs(),
            self.backoff_interval.as_secs()
        );

        loop {
            let delay = self.step().await;

            tokio::select! {
                _ = guard.wait() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("Main loop stopped");
    }
}
