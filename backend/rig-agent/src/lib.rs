pub mod cli;
pub mod controller;
pub mod error;
pub mod hostname;
pub mod logger;
pub mod main_loop;
pub mod policy;
pub mod probe;
pub mod processor;
pub mod shutdown;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use controller::{
    command_output::CommandOutput, process_controller::ProcessController,
    systemd_controller::SystemdController,
};
pub use error::{AgentError, Result as AgentResult, panic_message};
pub use hostname::resolve_hostname;
pub use main_loop::{CycleReport, LoopState, MainLoop};
pub use policy::{
    decision::{Decision, UnhealthyReason},
    self_healing_policy::{SelfHealingPolicy, evaluate},
};
pub use probe::{probe_outcome::ProbeOutcome, status_probe::StatusProbe, summary::parse_summary};
pub use processor::{
    command_outcome::CommandOutcome,
    command_queue_processor::{CommandQueueProcessor, state_change},
};
pub use shutdown::{shutdown_coordinator::ShutdownCoordinator, shutdown_guard::ShutdownGuard};
