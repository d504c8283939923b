use crate::{AgentError, AgentResult};

/// Name of this host's process-state row: the configured override, else the OS hostname.
pub fn resolve_hostname(configured: Option<&str>) -> AgentResult<String> {
    if let Some(name) = configured {
        let name = name.trim();
        if name.is_empty() {
            return Err(AgentError::hostname("configured hostname is blank"));
        }
        return Ok(name.to_string());
    }

    let raw = nix::unistd::gethostname().map_err(|e| AgentError::hostname(e.to_string()))?;
    let name = raw
        .into_string()
        .map_err(|raw| AgentError::hostname(format!("hostname is not UTF-8: {:?}", raw)))?;

    if name.trim().is_empty() {
        return Err(AgentError::hostname("OS reported an empty hostname"));
    }

    Ok(name.trim().to_string())
}
