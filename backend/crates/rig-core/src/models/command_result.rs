use crate::CommandStatus;

/// Terminal outcome recorded on a claimed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Completed { result: String },
    Failed { error_message: String },
}

impl CommandResult {
    pub fn status(&self) -> CommandStatus {
        match self {
            Self::Completed { .. } => CommandStatus::Completed,
            Self::Failed { .. } => CommandStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
