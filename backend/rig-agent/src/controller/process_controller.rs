use crate::{AgentResult, CommandOutput};

use rig_core::CommandAction;

use async_trait::async_trait;

/// Adapter over the host service manager for the workload unit.
///
/// Implementations hold no state and never retry. A non-zero exit is returned
/// as `Ok` with the captured output; `Err` is reserved for failing to run the
/// service manager at all (spawn failure, timeout).
#[async_trait]
pub trait ProcessController: Send + Sync {
    async fn start(&self) -> AgentResult<CommandOutput>;

    async fn stop(&self) -> AgentResult<CommandOutput>;

    async fn restart(&self) -> AgentResult<CommandOutput>;

    /// Whether the service manager reports the unit as running.
    /// Any failure to ask counts as inactive.
    async fn is_active(&self) -> bool;

    async fn execute(&self, action: CommandAction) -> AgentResult<CommandOutput> {
        match action {
            CommandAction::Start => self.start().await,
            CommandAction::Stop => self.stop().await,
            CommandAction::Restart => self.restart().await,
        }
    }
}
