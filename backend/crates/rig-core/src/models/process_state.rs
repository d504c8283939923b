use crate::ProcessStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable record of what an agent last observed about its workload process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessState {
    pub hostname: String,
    pub status: ProcessStatus,

    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub last_health_check_at: Option<DateTime<Utc>>,

    // Monotonic counters
    pub error_count: i64,
    pub restart_count: i64,
    pub last_error: Option<String>,

    // Latest snapshot
    pub hashrate: Option<f64>,
    pub accepted_shares: Option<i64>,
    pub rejected_shares: Option<i64>,
    pub health_data: Option<String>,

    pub updated_at: DateTime<Utc>,
}
