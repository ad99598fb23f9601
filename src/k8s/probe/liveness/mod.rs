// Package liveness provides Kubernetes liveness probe functionality.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

pub mod error;
pub mod prober;
pub mod service;

pub use error::TimeoutIsTooShortError;
pub use prober::Prober;
pub use service::Service;

const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Liveness probe implementation
pub struct Probe {
    services: RwLock<Vec<Arc<dyn Service>>>,
    timeout: Duration,
}

impl Probe {
    /// Creates a new liveness probe
    pub fn new(timeout_duration: Duration) -> Self {
        let timeout = if timeout_duration < MIN_TIMEOUT {
            warn!(
                component = "liveness",
                error = %TimeoutIsTooShortError,
                "min timeout duration is 1ms (timeout set up as 10ms as a more reasonable value)"
            );
            Duration::from_millis(10)
        } else {
            timeout_duration
        };

        Self {
            services: RwLock::new(Vec::new()),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl Prober for Probe {
    fn watch(&self, services: Vec<Arc<dyn Service>>) {
        self.services.write().extend(services);
    }

    async fn is_alive(&self) -> bool {
        let services = self.services.read().clone();
        if services.is_empty() {
            return false;
        }

        let check = async {
            for service in &services {
                if !service.is_alive().await {
                    return false;
                }
            }
            true
        };

        match timeout(self.timeout, check).await {
            Ok(alive) => alive,
            Err(_) => {
                warn!(
                    component = "liveness",
                    event = "deadline_exceeded",
                    "liveness probe deadline exceeded while checking service"
                );
                false
            }
        }
    }
}
