pub mod connection;
pub mod error;
pub mod repositories;
pub mod state_store;

pub use connection::database::{DatabaseOptions, connect, run_migrations};
pub use error::{DbError, Result as DbErrorResult};
pub use repositories::command_repository::{ClaimScope, CommandRepository};
pub use repositories::process_state_repository::ProcessStateRepository;
pub use state_store::StateStore;

pub use sqlx::SqlitePool;
