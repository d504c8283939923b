use serde::Deserialize;

/// Command queue addressing
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueueConfig {
    /// Only claim broadcast commands and commands addressed to this host.
    /// Off by default: any agent may claim any pending command.
    pub scope_to_host: bool,
}
