use crate::{ClaimScope, CommandRepository, DbErrorResult, ProcessStateRepository};

use rig_core::{Command, CommandResult, CommandStatus, NewCommand, ProcessState, ProcessStateUpdate};

use sqlx::SqlitePool;

/// Persistence boundary of the agent.
///
/// Every operation is a single SQLite statement, so each one is atomic on its
/// own and safe to run from several agents sharing the same database file.
#[derive(Clone)]
pub struct StateStore {
    commands: CommandRepository,
    process_states: ProcessStateRepository,
    scope: ClaimScope,
}

impl StateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            commands: CommandRepository::new(pool.clone()),
            process_states: ProcessStateRepository::new(pool),
            scope: ClaimScope::Any,
        }
    }

    pub fn with_scope(mut self, scope: ClaimScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> &ClaimScope {
        &self.scope
    }

    pub async fn claim_next_command(&self) -> DbErrorResult<Option<Command>> {
        self.commands.claim_next(&self.scope).await
    }

    pub async fn record_command_outcome(
        &self,
        id: i64,
        outcome: &CommandResult,
    ) -> DbErrorResult<bool> {
        self.commands.record_outcome(id, outcome).await
    }

    pub async fn insert_command(&self, command: &NewCommand) -> DbErrorResult<Command> {
        self.commands.insert(command).await
    }

    pub async fn upsert_process_state(
        &self,
        hostname: &str,
        update: &ProcessStateUpdate,
    ) -> DbErrorResult<()> {
        self.process_states.upsert(hostname, update).await
    }

    pub async fn find_command(&self, id: i64) -> DbErrorResult<Option<Command>> {
        self.commands.find_by_id(id).await
    }

    pub async fn list_commands(&self, status: CommandStatus) -> DbErrorResult<Vec<Command>> {
        self.commands.find_by_status(status).await
    }

    pub async fn count_commands(&self, status: CommandStatus) -> DbErrorResult<i64> {
        self.commands.count_by_status(status).await
    }

    pub async fn find_process_state(&self, hostname: &str) -> DbErrorResult<Option<ProcessState>> {
        self.process_states.find_by_hostname(hostname).await
    }
}
