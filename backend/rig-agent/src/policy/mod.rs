pub mod decision;
pub mod self_healing_policy;
