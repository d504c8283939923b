use crate::CommandStatus;

use std::str::FromStr;

#[test]
fn test_command_status_round_trips_through_str() {
    for status in [
        CommandStatus::Pending,
        CommandStatus::Processing,
        CommandStatus::Completed,
        CommandStatus::Failed,
    ] {
        assert_eq!(CommandStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_command_status_terminal() {
    assert!(!CommandStatus::Pending.is_terminal());
    assert!(!CommandStatus::Processing.is_terminal());
    assert!(CommandStatus::Completed.is_terminal());
    assert!(CommandStatus::Failed.is_terminal());
}

#[test]
fn test_command_status_default() {
    assert_eq!(CommandStatus::default(), CommandStatus::Pending);
}
