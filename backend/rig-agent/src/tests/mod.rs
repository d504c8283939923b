
use rig_core::HealthSnapshot;

pub(crate) fn snapshot(total_hashrate: f64) -> HealthSnapshot {
    HealthSnapshot {
        worker_id: String::from("rig-01"),
        total_hashrate,
        accepted_shares: 10,
        rejected_shares: 1,
        raw: String::from("{}"),
    }
}
