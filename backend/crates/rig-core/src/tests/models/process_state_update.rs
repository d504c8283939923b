use crate::{HealthSnapshot, ProcessStateUpdate, ProcessStatus};

use googletest::prelude::*;

#[test]
fn given_error_and_restart_when_chained_then_counters_accumulate() {
    let update = ProcessStateUpdate::status(ProcessStatus::Unhealthy)
        .with_error("api_not_responding")
        .with_restart();

    assert_that!(update.status, some(eq(ProcessStatus::Unhealthy)));
    assert_that!(update.error_increment, eq(1));
    assert_that!(update.restart_increment, eq(1));
    assert_that!(update.last_error, some(eq("api_not_responding")));
}

#[test]
fn given_snapshot_when_applied_then_metrics_are_copied() {
    let snapshot = HealthSnapshot {
        worker_id: "rig-01".to_string(),
        total_hashrate: 1234.5,
        accepted_shares: 10,
        rejected_shares: 2,
        raw: "{}".to_string(),
    };

    let update = ProcessStateUpdate::status(ProcessStatus::Running).with_snapshot(&snapshot);

    assert_that!(update.hashrate, some(eq(1234.5)));
    assert_that!(update.accepted_shares, some(eq(10)));
    assert_that!(update.rejected_shares, some(eq(2)));
    assert_that!(update.health_data, some(eq("{}")));
    assert_that!(update.error_increment, eq(0));
}

#[test]
fn test_snapshot_zero_hashrate() {
    let mut snapshot = HealthSnapshot {
        worker_id: String::new(),
        total_hashrate: 0.0,
        accepted_shares: 0,
        rejected_shares: 0,
        raw: String::new(),
    };
    assert!(snapshot.has_zero_hashrate());

    snapshot.total_hashrate = 0.01;
    assert!(!snapshot.has_zero_hashrate());
}
