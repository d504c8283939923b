use rig_config::Config;

use std::path::PathBuf;

use clap::Parser;

/// Command-line flags. Each one, when given, beats the config file and `RIG_*` variables.
#[derive(Debug, Parser)]
#[command(name = "rig-agent")]
#[command(about = "Mining host control agent: executes queued commands and restarts unhealthy workloads")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $RIG_CONFIG, then /etc/rig-agent/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Shared SQLite database file
    #[arg(long, value_name = "PATH")]
    pub database: Option<String>,

    /// Seconds between cycles
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Workload status endpoint
    #[arg(long, value_name = "URL")]
    pub health_url: Option<String>,

    /// Service-manager unit running the workload
    #[arg(long, value_name = "NAME")]
    pub unit: Option<String>,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref database) = self.database {
            config.database.path = database.clone();
        }
        if let Some(poll_interval) = self.poll_interval {
            config.agent.poll_interval_secs = poll_interval;
        }
        if let Some(ref url) = self.health_url {
            config.probe.url = url.clone();
        }
        if let Some(ref unit) = self.unit {
            config.service.unit = unit.clone();
        }
    }
}
