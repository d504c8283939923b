pub mod probe_outcome;
pub mod status_probe;
pub mod summary;
