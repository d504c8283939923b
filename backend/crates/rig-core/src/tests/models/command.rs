use crate::{CommandAction, NewCommand};

use googletest::prelude::*;

#[test]
fn given_health_cause_when_building_restart_then_reason_is_prefixed() {
    let command = NewCommand::health_restart("zero_hashrate");

    assert_that!(command.action, eq(CommandAction::Restart));
    assert_that!(command.reason, eq("health_check_failed:zero_hashrate"));
    assert_that!(command.target_host, none());
}

#[test]
fn given_manual_command_when_addressed_to_host_then_target_is_set() {
    let command = NewCommand::manual(CommandAction::Stop).for_host("rig-07");

    assert_that!(command.reason, eq("manual"));
    assert_that!(command.target_host, some(eq("rig-07")));
}
