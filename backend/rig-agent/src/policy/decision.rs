use rig_core::ProcessStatus;

/// Why a host was judged unhealthy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnhealthyReason {
    /// Service manager says the unit runs but the status endpoint does not answer
    ApiNotResponding,
    ZeroHashrate,
}

impl UnhealthyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiNotResponding => "api_not_responding",
            Self::ZeroHashrate => "zero_hashrate",
        }
    }
}

impl std::fmt::Display for UnhealthyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict of one health evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to fix; `observed` is `Running` or `Stopped`
    Healthy { observed: ProcessStatus },
    Unhealthy(UnhealthyReason),
}

impl Decision {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy { .. })
    }
}
