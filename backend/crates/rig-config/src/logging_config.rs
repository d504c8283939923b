use crate::LogLevel;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Append logs to this file instead of stdout
    pub file: Option<String>,
    /// Colored level names on stdout (ignored for file output)
    pub colored: bool,
}
