use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid command action: {value} {location}")]
    InvalidCommandAction {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid command status: {value} {location}")]
    InvalidCommandStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid process status: {value} {location}")]
    InvalidProcessStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid timestamp in {field}: {value} {location}")]
    InvalidTimestamp {
        field: String,
        value: i64,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
