// Package shutdown provides graceful shutdown functionality.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
#[error("graceful shutdown timeout exceeded")]
pub struct TimeoutError;

/// Graceful shutdown handler.
///
/// Long-running tasks are spawned through it; on shutdown the token is
/// cancelled and the tasks get `timeout` to finish.
#[derive(Clone)]
pub struct GracefulShutdown {
    shutdown_token: CancellationToken,
    timeout: Duration,
    tracker: TaskTracker,
}

impl GracefulShutdown {
    /// Creates a new graceful shutdown handler
    pub fn new(shutdown_token: CancellationToken, timeout: Duration) -> Self {
        Self {
            shutdown_token,
            timeout,
            tracker: TaskTracker::new(),
        }
    }

    /// Spawns a task that shutdown waits for.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(task);
    }

    /// Waits for an OS signal or cancellation, then for all tracked tasks.
    pub async fn await_shutdown(&self) -> Result<()> {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!(
                    component = "graceful-shutdown",
                    event = "os_signal",
                    signal = "SIGINT",
                    "cancellation started"
                );
            }
            _ = terminate() => {
                info!(
                    component = "graceful-shutdown",
                    event = "os_signal",
                    signal = "SIGTERM",
                    "cancellation started"
                );
            }
            _ = self.shutdown_token.cancelled() => {
                info!(
                    component = "graceful-shutdown",
                    event = "ctx_done",
                    "cancellation started"
                );
            }
        }

        self.cancel_and_await_with_timeout().await
    }

    /// Cancels the token and waits for tracked tasks, bounded by the timeout.
    pub async fn cancel_and_await_with_timeout(&self) -> Result<()> {
        self.shutdown_token.cancel();
        self.tracker.close();

        match timeout(self.timeout, self.tracker.wait()).await {
            Ok(()) => {
                info!(
                    component = "graceful-shutdown",
                    event = "shutdown_success",
                    "service was gracefully shut down"
                );
                Ok(())
            }
            Err(_) => {
                warn!(
                    component = "graceful-shutdown",
                    event = "shutdown_timeout",
                    timeout_secs = self.timeout.as_secs(),
                    tasks = self.tracker.len(),
                    "not all tasks were closed within timeout"
                );
                Err(TimeoutError.into())
            }
        }
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sig) => {
            sig.recv().await;
        }
        Err(e) => {
            warn!(
                component = "graceful-shutdown",
                event = "sigterm_unavailable",
                error = %e,
                "failed to install SIGTERM handler"
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
