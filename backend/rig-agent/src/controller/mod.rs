pub mod command_output;
pub mod process_controller;
pub mod systemd_controller;
