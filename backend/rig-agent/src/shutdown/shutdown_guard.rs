use crate::ShutdownCoordinator;

use tokio::sync::broadcast;

/// Per-task view of a [`ShutdownCoordinator`]
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
    coordinator: ShutdownCoordinator,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
            coordinator: coordinator.clone(),
        }
    }

    /// Wait for shutdown signal. Returns at once if it was already triggered.
    pub async fn wait(&mut self) {
        if self.coordinator.is_shutdown() {
            return;
        }
        let _ = self.shutdown_rx.recv().await;
    }

    /// Non-blocking check
    pub fn poll_shutdown(&mut self) -> bool {
        self.coordinator.is_shutdown() || self.shutdown_rx.try_recv().is_ok()
    }
}
