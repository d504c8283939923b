use crate::CommandAction;

use std::str::FromStr;

#[test]
fn test_command_action_as_str() {
    assert_eq!(CommandAction::Start.as_str(), "start");
    assert_eq!(CommandAction::Stop.as_str(), "stop");
    assert_eq!(CommandAction::Restart.as_str(), "restart");
}

#[test]
fn test_command_action_from_str() {
    assert_eq!(
        CommandAction::from_str("restart").unwrap(),
        CommandAction::Restart
    );
    assert!(CommandAction::from_str("reboot").is_err());
    assert!(CommandAction::from_str("START").is_err());
}
