#![allow(dead_code)]

mod fake_controller;
mod test_db;

pub use fake_controller::{FakeController, Scripted};
pub use test_db::{count_restarts, create_test_pool};

use rig_agent::StatusProbe;
use rig_config::ProbeConfig;

pub const HOSTNAME: &str = "rig-test-01";

/// Probe pointed at `<base>/summary` with a short timeout
pub fn probe_for(base_uri: &str, timeout_ms: u64) -> StatusProbe {
    StatusProbe::new(&ProbeConfig {
        url: format!("{}/summary", base_uri),
        timeout_ms,
        access_token: None,
    })
    .expect("Failed to build probe")
}

pub fn summary_body(hashrate: f64) -> String {
    format!(
        r#"{{"worker_id":"{HOSTNAME}","hashrate":{{"total":[{hashrate},null,null]}},"results":{{"shares_good":42,"shares_bad":1}}}}"#
    )
}
