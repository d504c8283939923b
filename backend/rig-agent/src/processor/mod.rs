pub mod command_outcome;
pub mod command_queue_processor;
