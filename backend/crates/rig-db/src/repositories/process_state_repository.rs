use crate::{DbError, DbErrorResult};

use rig_core::{CoreResult, ProcessState, ProcessStateUpdate, ProcessStatus, parse_timestamp};

use std::str::FromStr;

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, FromRow)]
struct ProcessStateRow {
    hostname: String,
    status: String,
    started_at: Option<i64>,
    stopped_at: Option<i64>,
    error_count: i64,
    restart_count: i64,
    last_error: Option<String>,
    last_health_check_at: Option<i64>,
    hashrate: Option<f64>,
    accepted_shares: Option<i64>,
    rejected_shares: Option<i64>,
    health_data: Option<String>,
    updated_at: i64,
}

fn optional_timestamp(value: Option<i64>, field: &str) -> CoreResult<Option<chrono::DateTime<Utc>>> {
    value.map(|ts| parse_timestamp(ts, field)).transpose()
}

impl ProcessStateRow {
    fn into_state(self) -> CoreResult<ProcessState> {
        Ok(ProcessState {
            status: ProcessStatus::from_str(&self.status)?,
            started_at: optional_timestamp(self.started_at, "process_state.started_at")?,
            stopped_at: optional_timestamp(self.stopped_at, "process_state.stopped_at")?,
            last_health_check_at: optional_timestamp(
                self.last_health_check_at,
                "process_state.last_health_check_at",
            )?,
            updated_at: parse_timestamp(self.updated_at, "process_state.updated_at")?,
            hostname: self.hostname,
            error_count: self.error_count,
            restart_count: self.restart_count,
            last_error: self.last_error,
            hashrate: self.hashrate,
            accepted_shares: self.accepted_shares,
            rejected_shares: self.rejected_shares,
            health_data: self.health_data,
        })
    }
}

#[derive(Clone)]
pub struct ProcessStateRepository {
    pool: SqlitePool,
}

impl ProcessStateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the host's row if absent, otherwise merge `update` into it.
    ///
    /// Unset fields keep their stored value; counters are added, never
    /// assigned.
    pub async fn upsert(&self, hostname: &str, update: &ProcessStateUpdate) -> DbErrorResult<()> {
        let status = update.status.map(|s| s.as_str());
        let updated_at = Utc::now().timestamp();

        sqlx::query(
            r#"
              INSERT INTO process_state (
                  hostname, status, started_at, stopped_at, error_count, restart_count,
                  last_error, last_health_check_at, hashrate, accepted_shares,
                  rejected_shares, health_data, updated_at
              ) VALUES (?, COALESCE(?, 'stopped'), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(hostname) DO UPDATE SET
                  status = COALESCE(?, process_state.status),
                  started_at = COALESCE(excluded.started_at, process_state.started_at),
                  stopped_at = COALESCE(excluded.stopped_at, process_state.stopped_at),
                  error_count = process_state.error_count + excluded.error_count,
                  restart_count = process_state.restart_count + excluded.restart_count,
                  last_error = COALESCE(excluded.last_error, process_state.last_error),
                  last_health_check_at = COALESCE(excluded.last_health_check_at, process_state.last_health_check_at),
                  hashrate = COALESCE(excluded.hashrate, process_state.hashrate),
                  accepted_shares = COALESCE(excluded.accepted_shares, process_state.accepted_shares),
                  rejected_shares = COALESCE(excluded.rejected_shares, process_state.rejected_shares),
                  health_data = COALESCE(excluded.health_data, process_state.health_data),
                  updated_at = excluded.updated_at
              "#,
        )
        .bind(hostname)
        .bind(status)
        .bind(update.started_at.map(|dt| dt.timestamp()))
        .bind(update.stopped_at.map(|dt| dt.timestamp()))
        .bind(i64::from(update.error_increment))
        .bind(i64::from(update.restart_increment))
        .bind(update.last_error.as_deref())
        .bind(update.last_health_check_at.map(|dt| dt.timestamp()))
        .bind(update.hashrate)
        .bind(update.accepted_shares)
        .bind(update.rejected_shares)
        .bind(update.health_data.as_deref())
        .bind(updated_at)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_hostname(&self, hostname: &str) -> DbErrorResult<Option<ProcessState>> {
        let row = sqlx::query_as::<_, ProcessStateRow>(
            r#"
              SELECT hostname, status, started_at, stopped_at, error_count, restart_count,
                     last_error, last_health_check_at, hashrate, accepted_shares,
                     rejected_shares, health_data, updated_at
              FROM process_state
              WHERE hostname = ?
              "#,
        )
        .bind(hostname)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            r.into_state()
                .map_err(|e| DbError::invalid_row("process_state", e))
        })
        .transpose()
    }
}
