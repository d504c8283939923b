mod command;
mod command_action;
mod command_status;
mod process_state_update;
mod process_status;
