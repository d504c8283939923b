use crate::{DbError, DbErrorResult};

use rig_core::{
    Command, CommandResult, CommandStatus, CoreResult, NewCommand, parse_timestamp,
};

use std::str::FromStr;

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

const COMMAND_COLUMNS: &str = "id, action, status, reason, result, error_message, target_host, created_at, processed_at";

/// Which pending commands an agent is allowed to claim
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClaimScope {
    /// Every pending command, regardless of addressing
    #[default]
    Any,
    /// Broadcast commands plus the ones addressed to this host
    Host(String),
}

#[derive(Debug, FromRow)]
struct CommandRow {
    id: i64,
    action: String,
    status: String,
    reason: Option<String>,
    result: Option<String>,
    error_message: Option<String>,
    target_host: Option<String>,
    created_at: i64,
    processed_at: Option<i64>,
}

impl CommandRow {
    fn into_command(self) -> CoreResult<Command> {
        Ok(Command {
            id: self.id,
            action: self.action.parse()?,
            status: CommandStatus::from_str(&self.status)?,
            reason: self.reason,
            result: self.result,
            error_message: self.error_message,
            target_host: self.target_host,
            created_at: parse_timestamp(self.created_at, "commands.created_at")?,
            processed_at: self
                .processed_at
                .map(|ts| parse_timestamp(ts, "commands.processed_at"))
                .transpose()?,
        })
    }
}

fn to_command(row: CommandRow) -> DbErrorResult<Command> {
    row.into_command()
        .map_err(|e| DbError::invalid_row("commands", e))
}

#[derive(Clone)]
pub struct CommandRepository {
    pool: SqlitePool,
}

impl CommandRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomically move the oldest claimable pending command to `processing`.
    ///
    /// The select and the update run as one statement, so concurrent claimers
    /// (other connections or other agents on the same file) serialize on the
    /// SQLite write lock and at most one of them gets the row back.
    pub async fn claim_next(&self, scope: &ClaimScope) -> DbErrorResult<Option<Command>> {
        let processed_at = Utc::now().timestamp();

        let host_filter = match scope {
            ClaimScope::Any => "",
            ClaimScope::Host(_) => "AND (target_host IS NULL OR target_host = ?)",
        };

        let sql = format!(
            r#"
              UPDATE commands
              SET status = 'processing', processed_at = ?
              WHERE status = 'pending'
                AND id = (
                    SELECT id FROM commands
                    WHERE status = 'pending' {host_filter}
                    ORDER BY created_at ASC, id ASC
                    LIMIT 1
                )
              RETURNING {COMMAND_COLUMNS}
              "#
        );

        let mut query = sqlx::query_as::<_, CommandRow>(&sql).bind(processed_at);
        if let ClaimScope::Host(hostname) = scope {
            query = query.bind(hostname);
        }

        let row = query.fetch_optional(&self.pool).await?;

        row.map(to_command).transpose()
    }

    /// Store the terminal outcome of a claimed command.
    ///
    /// Only rows in `processing` are touched; returns `false` when the command
    /// was not in that state, so status never moves backwards.
    pub async fn record_outcome(&self, id: i64, outcome: &CommandResult) -> DbErrorResult<bool> {
        let (result, error_message) = match outcome {
            CommandResult::Completed { result } => (Some(result.as_str()), None),
            CommandResult::Failed { error_message } => (None, Some(error_message.as_str())),
        };

        let done = sqlx::query(
            r#"
              UPDATE commands
              SET status = ?, result = ?, error_message = ?
              WHERE id = ? AND status = 'processing'
              "#,
        )
        .bind(outcome.status().as_str())
        .bind(result)
        .bind(error_message)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected() == 1)
    }

    pub async fn insert(&self, command: &NewCommand) -> DbErrorResult<Command> {
        let created_at = Utc::now().timestamp();

        let sql = format!(
            r#"
              INSERT INTO commands (action, status, reason, target_host, created_at)
              VALUES (?, 'pending', ?, ?, ?)
              RETURNING {COMMAND_COLUMNS}
              "#
        );

        let row = sqlx::query_as::<_, CommandRow>(&sql)
            .bind(command.action.as_str())
            .bind(&command.reason)
            .bind(command.target_host.as_deref())
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;

        to_command(row)
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<Command>> {
        let sql = format!("SELECT {COMMAND_COLUMNS} FROM commands WHERE id = ?");

        let row = sqlx::query_as::<_, CommandRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(to_command).transpose()
    }

    /// Commands in the given status, oldest first
    pub async fn find_by_status(&self, status: CommandStatus) -> DbErrorResult<Vec<Command>> {
        let sql = format!(
            "SELECT {COMMAND_COLUMNS} FROM commands WHERE status = ? ORDER BY created_at ASC, id ASC"
        );

        let rows = sqlx::query_as::<_, CommandRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(to_command).collect()
    }

    pub async fn count_by_status(&self, status: CommandStatus) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM commands WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
