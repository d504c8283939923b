use crate::{DbError, DbErrorResult};

use std::path::PathBuf;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

/// Connection settings for the shared SQLite store
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub path: PathBuf,
    pub max_connections: u32,
    /// How long a statement waits on another writer before failing
    pub busy_timeout: Duration,
}

impl DatabaseOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Open (creating if needed) the database file and bring the schema up to date.
pub async fn connect(options: &DatabaseOptions) -> DbErrorResult<SqlitePool> {
    if let Some(parent) = options.path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| {
                DbError::initialization(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
    }

    let connect_options = SqliteConnectOptions::new()
        .filename(&options.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(options.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .connect_with(connect_options)
        .await?;

    info!("Database connection established: {}", options.path.display());

    run_migrations(&pool).await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> DbErrorResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::migration(format!("Migration failed: {}", e)))?;

    Ok(())
}
