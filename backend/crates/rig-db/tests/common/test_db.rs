use rig_db::{DatabaseOptions, connect, run_migrations};

use std::path::Path;
use std::time::Duration;

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

/// Opens a pool on a database file, the way each agent on a host would
pub async fn create_file_pool(path: &Path) -> SqlitePool {
    let options = DatabaseOptions {
        path: path.to_path_buf(),
        max_connections: 2,
        busy_timeout: Duration::from_secs(10),
    };

    connect(&options).await.expect("Failed to open database file")
}

/// Inserts a pending command with an explicit creation time
pub async fn insert_pending_at(
    pool: &SqlitePool,
    action: &str,
    reason: &str,
    created_at: i64,
) -> i64 {
    // Use sqlx::query (not the repository) to control created_at
    let result = sqlx::query(
        "INSERT INTO commands (action, status, reason, created_at) VALUES (?, 'pending', ?, ?)",
    )
    .bind(action)
    .bind(reason)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("Failed to insert command");

    result.last_insert_rowid()
}
