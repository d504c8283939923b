pub mod command_repository;
pub mod process_state_repository;
