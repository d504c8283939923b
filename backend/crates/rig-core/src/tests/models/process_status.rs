use crate::ProcessStatus;

use std::str::FromStr;

#[test]
fn test_process_status_from_str() {
    assert_eq!(
        ProcessStatus::from_str("restarting").unwrap(),
        ProcessStatus::Restarting
    );
    assert_eq!(
        ProcessStatus::from_str("crashed").unwrap(),
        ProcessStatus::Crashed
    );
    assert!(ProcessStatus::from_str("zombie").is_err());
}

#[test]
fn test_process_status_display() {
    assert_eq!(ProcessStatus::Unhealthy.to_string(), "unhealthy");
    assert_eq!(ProcessStatus::default().to_string(), "stopped");
}
