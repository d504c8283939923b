use rig_db::run_migrations;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Restart commands the agent enqueued for the given cause, in any status
pub async fn count_restarts(pool: &SqlitePool, cause: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM commands WHERE action = 'restart' AND reason = ?",
    )
    .bind(format!("health_check_failed:{}", cause))
    .fetch_one(pool)
    .await
    .expect("Failed to count restarts");

    count
}
