use serde::{Deserialize, Serialize};

/// Point-in-time health report of the workload process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub worker_id: String,
    pub total_hashrate: f64,
    pub accepted_shares: i64,
    pub rejected_shares: i64,

    /// Body exactly as served by the status endpoint
    pub raw: String,
}

impl HealthSnapshot {
    pub fn has_zero_hashrate(&self) -> bool {
        self.total_hashrate <= 0.0
    }
}
