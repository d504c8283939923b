use rig_core::HealthSnapshot;

/// Result of one status-endpoint read. Unreachable is an observation, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Snapshot(HealthSnapshot),
    Unreachable { reason: String },
}

impl ProbeOutcome {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    pub fn snapshot(&self) -> Option<&HealthSnapshot> {
        match self {
            Self::Snapshot(snapshot) => Some(snapshot),
            Self::Unreachable { .. } => None,
        }
    }
}
