//! End-to-end cycles with a fake service manager, mock status endpoint and in-memory store

mod common;

use common::{
    FakeController, HOSTNAME, Scripted, count_restarts, create_test_pool, probe_for, summary_body,
};

use rig_agent::{
    CommandQueueProcessor, Decision, LoopState, MainLoop, SelfHealingPolicy, ShutdownCoordinator,
    UnhealthyReason,
};
use rig_core::{CommandAction, CommandStatus, NewCommand, ProcessStatus};
use rig_db::{SqlitePool, StateStore};

use std::sync::Arc;
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{contains_substring, eq, len, some};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const POLL: Duration = Duration::from_millis(20);
const BACKOFF: Duration = Duration::from_millis(50);

fn build_loop(
    pool: &SqlitePool,
    controller: &Arc<FakeController>,
    server: &MockServer,
    probe_timeout_ms: u64,
) -> MainLoop {
    let store = StateStore::new(pool.clone());
    let processor = CommandQueueProcessor::new(store.clone(), controller.clone(), HOSTNAME);
    let policy = SelfHealingPolicy::new(store, HOSTNAME);

    MainLoop::new(
        processor,
        probe_for(&server.uri(), probe_timeout_ms),
        controller.clone(),
        policy,
    )
    .with_intervals(POLL, BACKOFF)
}

async fn healthy_server(hashrate: f64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_string(summary_body(hashrate)))
        .mount(&server)
        .await;
    server
}

// =========================================================================
// Scenario Tests
// =========================================================================

#[tokio::test]
async fn given_pending_start_and_healthy_workload_when_cycle_runs_then_completed_and_running() {
    // Given
    let pool = create_test_pool().await;
    let store = StateStore::new(pool.clone());
    let command = store
        .insert_command(&NewCommand::manual(CommandAction::Start))
        .await
        .unwrap();
    let controller = Arc::new(FakeController::new(true));
    let server = healthy_server(1200.0).await;
    let main_loop = build_loop(&pool, &controller, &server, 1000);

    // When
    let report = main_loop.run_cycle().await.unwrap();

    // Then
    assert_that!(report.commands, len(eq(1)));
    assert_that!(
        report.decision,
        eq(Decision::Healthy {
            observed: ProcessStatus::Running
        })
    );
    let stored = store.find_command(command.id).await.unwrap().unwrap();
    assert_that!(stored.status, eq(CommandStatus::Completed));
    let state = store.find_process_state(HOSTNAME).await.unwrap().unwrap();
    assert_that!(state.status, eq(ProcessStatus::Running));
    assert!(state.started_at.is_some());
}

#[tokio::test]
async fn given_three_probe_timeouts_with_active_service_when_cycles_run_then_three_restarts() {
    // Given
    let pool = create_test_pool().await;
    let controller = Arc::new(FakeController::new(true));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(summary_body(1000.0))
                .set_delay(Duration::from_millis(1000)),
        )
        .mount(&server)
        .await;
    let main_loop = build_loop(&pool, &controller, &server, 150);

    // When
    for _ in 0..3 {
        let report = main_loop.run_cycle().await.unwrap();
        assert_that!(
            report.decision,
            eq(Decision::Unhealthy(UnhealthyReason::ApiNotResponding))
        );
    }

    // Then
    assert_that!(count_restarts(&pool, "api_not_responding").await, eq(3));
    let store = StateStore::new(pool.clone());
    let state = store.find_process_state(HOSTNAME).await.unwrap().unwrap();
    assert_that!(state.restart_count, eq(3));
    assert_that!(state.error_count, eq(3));
    assert_that!(state.status, eq(ProcessStatus::Unhealthy));
    // Restarts enqueued by cycles 1 and 2 were executed by cycles 2 and 3
    assert_eq!(
        controller.calls(),
        vec![CommandAction::Restart, CommandAction::Restart]
    );
}

#[tokio::test]
async fn given_zero_hashrate_when_cycles_run_then_restart_enqueued_then_executed() {
    let pool = create_test_pool().await;
    let controller = Arc::new(FakeController::new(true));
    let server = healthy_server(0.0).await;
    let main_loop = build_loop(&pool, &controller, &server, 1000);

    let first = main_loop.run_cycle().await.unwrap();
    let second = main_loop.run_cycle().await.unwrap();

    assert_that!(first.commands, len(eq(0)));
    assert_that!(second.commands, len(eq(1)));
    assert_that!(second.commands[0].action, eq(CommandAction::Restart));
    assert_that!(count_restarts(&pool, "zero_hashrate").await, eq(2));
}

// =========================================================================
// Backoff Tests
// =========================================================================

#[tokio::test]
async fn given_database_failure_when_stepped_then_backoff() {
    let pool = create_test_pool().await;
    let controller = Arc::new(FakeController::new(true));
    let server = healthy_server(1000.0).await;
    let mut main_loop = build_loop(&pool, &controller, &server, 1000);
    pool.close().await;

    let delay = main_loop.step().await;

    assert_that!(delay, eq(BACKOFF));
    assert_that!(main_loop.state(), eq(LoopState::Backoff));
}

#[tokio::test]
async fn given_panicking_cycle_when_stepped_then_backoff_then_recovers() {
    // Given
    let pool = create_test_pool().await;
    let controller = Arc::new(FakeController::new(true));
    controller.set_panic_on_query(true);
    let server = healthy_server(1000.0).await;
    let mut main_loop = build_loop(&pool, &controller, &server, 1000);

    // When
    let first = main_loop.step().await;
    let state_after_panic = main_loop.state();
    controller.set_panic_on_query(false);
    let second = main_loop.step().await;

    // Then
    assert_that!(first, eq(BACKOFF));
    assert_that!(state_after_panic, eq(LoopState::Backoff));
    assert_that!(second, eq(POLL));
    assert_that!(main_loop.state(), eq(LoopState::Running));
}

#[tokio::test]
async fn given_controller_panic_during_command_when_stepped_then_command_failed() {
    // Given
    let pool = create_test_pool().await;
    let store = StateStore::new(pool.clone());
    let command = store
        .insert_command(&NewCommand::manual(CommandAction::Start))
        .await
        .unwrap();
    let controller = Arc::new(FakeController::new(true).script(Scripted::Panic));
    let server = healthy_server(1000.0).await;
    let mut main_loop = build_loop(&pool, &controller, &server, 1000);

    // When
    let delay = main_loop.step().await;
    for _ in 0..3 {
        main_loop.step().await;
    }

    // Then
    assert_that!(delay, eq(POLL));
    let stored = store.find_command(command.id).await.unwrap().unwrap();
    assert_that!(stored.status, eq(CommandStatus::Failed));
    assert_that!(
        stored.error_message,
        some(contains_substring("scripted controller panic"))
    );
    assert_that!(store.count_commands(CommandStatus::Processing).await.unwrap(), eq(0));
    assert_that!(controller.calls(), len(eq(1)));
}

#[tokio::test]
async fn given_shutdown_requested_when_running_then_loop_exits_after_cycle() {
    let pool = create_test_pool().await;
    let controller = Arc::new(FakeController::new(true));
    let server = healthy_server(1000.0).await;
    let main_loop = build_loop(&pool, &controller, &server, 1000);
    let shutdown = ShutdownCoordinator::new();
    shutdown.shutdown();

    let finished = tokio::time::timeout(Duration::from_secs(5), main_loop.run(&shutdown)).await;

    assert!(finished.is_ok());
    let store = StateStore::new(pool);
    let state = store.find_process_state(HOSTNAME).await.unwrap().unwrap();
    assert_that!(state.status, eq(ProcessStatus::Running));
}

#[tokio::test]
async fn given_shutdown_during_sleep_when_running_then_loop_stops_early() {
    let pool = create_test_pool().await;
    let controller = Arc::new(FakeController::new(false));
    let server = healthy_server(1000.0).await;
    let main_loop = build_loop(&pool, &controller, &server, 1000)
        .with_intervals(Duration::from_secs(3600), Duration::from_secs(3600));
    let shutdown = ShutdownCoordinator::new();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.shutdown();
    });

    let finished = tokio::time::timeout(Duration::from_secs(5), main_loop.run(&shutdown)).await;

    assert!(finished.is_ok());
}
