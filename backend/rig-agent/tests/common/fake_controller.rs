use rig_agent::{AgentError, AgentResult, CommandOutput, ProcessController};
use rig_core::CommandAction;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

/// Scripted response to the next start/stop/restart call
#[derive(Debug, Clone)]
pub enum Scripted {
    Succeed(&'static str),
    Fail { stderr: &'static str, exit_code: i32 },
    Timeout,
    Panic,
}

/// In-memory [`ProcessController`]; unscripted calls succeed with empty output
pub struct FakeController {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<CommandAction>>,
    active: AtomicBool,
    panic_on_query: AtomicBool,
}

impl FakeController {
    pub fn new(active: bool) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            active: AtomicBool::new(active),
            panic_on_query: AtomicBool::new(false),
        }
    }

    pub fn script(self, response: Scripted) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Make `is_active` panic until cleared
    pub fn set_panic_on_query(&self, panic: bool) {
        self.panic_on_query.store(panic, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<CommandAction> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, action: CommandAction) -> AgentResult<CommandOutput> {
        self.calls.lock().unwrap().push(action);
        let next = self.script.lock().unwrap().pop_front();

        match next.unwrap_or(Scripted::Succeed("")) {
            Scripted::Succeed(stdout) => Ok(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(0),
            }),
            Scripted::Fail { stderr, exit_code } => Ok(CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code: Some(exit_code),
            }),
            Scripted::Timeout => Err(AgentError::controller_timeout(
                format!("systemctl {} xmrig", action),
                1,
            )),
            Scripted::Panic => panic!("scripted controller panic"),
        }
    }
}

#[async_trait]
impl ProcessController for FakeController {
    async fn start(&self) -> AgentResult<CommandOutput> {
        self.respond(CommandAction::Start)
    }

    async fn stop(&self) -> AgentResult<CommandOutput> {
        self.respond(CommandAction::Stop)
    }

    async fn restart(&self) -> AgentResult<CommandOutput> {
        self.respond(CommandAction::Restart)
    }

    async fn is_active(&self) -> bool {
        if self.panic_on_query.load(Ordering::SeqCst) {
            panic!("scripted is-active panic");
        }
        self.active.load(Ordering::SeqCst)
    }
}
