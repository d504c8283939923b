use rig_core::{CommandAction, CommandResult};

/// One claimed command and what came of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command_id: i64,
    pub action: CommandAction,
    pub result: CommandResult,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}
