pub mod command;
pub mod command_action;
pub mod command_result;
pub mod command_status;
pub mod health_snapshot;
pub mod process_state;
pub mod process_state_update;
pub mod process_status;
