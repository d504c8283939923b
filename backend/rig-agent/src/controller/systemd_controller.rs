use crate::{AgentError, AgentResult, CommandOutput, ProcessController};

use rig_config::ServiceConfig;

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

const SUDO: &str = "sudo";

/// `systemctl` driven [`ProcessController`].
///
/// Mutating verbs go through `sudo -n` when configured; `is-active` is read-only
/// and always runs unprivileged.
#[derive(Debug, Clone)]
pub struct SystemdController {
    systemctl_path: String,
    unit: String,
    use_sudo: bool,
    timeout: Duration,
}

impl SystemdController {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            systemctl_path: config.systemctl_path.clone(),
            unit: config.unit.clone(),
            use_sudo: config.use_sudo,
            timeout: config.command_timeout(),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Program and arguments for a verb, e.g. `sudo -n systemctl restart xmrig`
    pub fn command_line(&self, verb: &str, privileged: bool) -> (String, Vec<String>) {
        let mut args = Vec::with_capacity(4);
        let program = if privileged && self.use_sudo {
            args.push(String::from("-n"));
            args.push(self.systemctl_path.clone());
            String::from(SUDO)
        } else {
            self.systemctl_path.clone()
        };
        args.push(String::from(verb));
        args.push(self.unit.clone());
        (program, args)
    }

    async fn run(&self, verb: &str, privileged: bool) -> AgentResult<CommandOutput> {
        let (program, args) = self.command_line(verb, privileged);
        debug!("Running {} {}", program, args.join(" "));

        let mut command = Command::new(&program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(AgentError::controller_spawn(program, source)),
            Err(_) => {
                return Err(AgentError::controller_timeout(
                    format!("systemctl {} {}", verb, self.unit),
                    self.timeout.as_secs(),
                ));
            }
        };

        Ok(CommandOutput::from(output))
    }
}

#[async_trait]
impl ProcessController for SystemdController {
    async fn start(&self) -> AgentResult<CommandOutput> {
        self.run("start", true).await
    }

    async fn stop(&self) -> AgentResult<CommandOutput> {
        self.run("stop", true).await
    }

    async fn restart(&self) -> AgentResult<CommandOutput> {
        self.run("restart", true).await
    }

    async fn is_active(&self) -> bool {
        match self.run("is-active", false).await {
            Ok(output) => output.success(),
            Err(e) => {
                warn!("Could not query state of {}: {}", self.unit, e);
                false
            }
        }
    }
}
