use crate::{Config, LogLevel};
use crate::tests::{EnvGuard, setup_config_file};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (_temp, path, _guard) = setup_config_file();
    std::fs::write(&path, "this is not valid toml {{{{").unwrap();

    // When
    let result = Config::load_from(None);

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_file_value_kept() {
    let (_temp, path, _guard) = setup_config_file();
    std::fs::write(&path, "[agent]\npoll_interval_secs = 12\n").unwrap();
    let _poll = EnvGuard::set("RIG_POLL_INTERVAL_SECS", "soon");

    let config = Config::load_from(None).unwrap();

    assert_that!(config.agent.poll_interval_secs, eq(12));
}

#[test]
#[serial]
fn given_unknown_log_level_in_toml_when_load_then_defaults_to_info() {
    let (_temp, path, _guard) = setup_config_file();
    std::fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();

    let config = Config::load_from(None).unwrap();

    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

#[test]
fn test_log_level_from_str() {
    assert_eq!(LogLevel::from_str("WARN").unwrap().0, LevelFilter::Warn);
    assert_eq!(LogLevel::from_str(" trace ").unwrap().0, LevelFilter::Trace);
    assert!(LogLevel::from_str("loud").is_err());
}
