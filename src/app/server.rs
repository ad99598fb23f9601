// HTTP server implementation for the directory application.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::{Config, ConfigTrait};
use crate::directory::Registry;
use crate::http::{Controller, Middleware, Server as HttpServerTrait};
use crate::liveness;

/// HTTP server implementation that wraps all dependencies.
pub struct HttpServer {
    server: Arc<dyn HttpServerTrait>,
    is_server_alive: Arc<AtomicBool>,
}

impl HttpServer {
    /// Creates a new HttpServer with every controller and middleware attached.
    pub fn new(
        ctx: CancellationToken,
        cfg: Config,
        directory: Arc<dyn Registry>,
        probe: Arc<liveness::Probe>,
    ) -> Self {
        let controllers = Self::controllers(&cfg, directory, probe);
        let middlewares = Self::middlewares(&cfg);
        let server = crate::http::HttpServer::new(ctx, cfg, controllers, middlewares);

        Self {
            server: Arc::new(server),
            is_server_alive: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns true if the server is marked as alive.
    pub fn is_alive(&self) -> bool {
        self.is_server_alive.load(Ordering::Relaxed)
    }

    /// Returns a liveness target reporting whether the server loop is running.
    pub fn liveness(&self) -> Arc<dyn liveness::Service> {
        Arc::new(ServerLiveness {
            is_server_alive: self.is_server_alive.clone(),
        })
    }

    /// Binds the configured listen address.
    pub async fn bind(&self) -> Result<TcpListener> {
        self.server.bind().await
    }

    /// Serves on the listener until shutdown (blocking call).
    pub async fn listen_and_serve(&self, listener: TcpListener) -> Result<()> {
        self.is_server_alive.store(true, Ordering::Relaxed);
        let result = self.server.serve(listener).await;
        self.is_server_alive.store(false, Ordering::Relaxed);
        result
    }

    /// Returns all HTTP controllers for the server.
    fn controllers(
        cfg: &Config,
        directory: Arc<dyn Registry>,
        probe: Arc<liveness::Probe>,
    ) -> Vec<Box<dyn Controller>> {
        use crate::controller;

        vec![
            // Healthcheck probe endpoint
            Box::new(controller::LivenessProbeController::new(probe)),
            // Metrics endpoint
            Box::new(controller::PrometheusMetricsController::new()),
            // Encodes and shows current config as json
            Box::new(controller::ShowConfigController::new(cfg.clone())),
            // Lists every activity with its participants
            Box::new(controller::ListActivitiesController::new(directory.clone())),
            // Adds a participant to an activity
            Box::new(controller::SignupController::new(directory.clone())),
            // Removes a participant from an activity
            Box::new(controller::UnregisterController::new(directory)),
        ]
    }

    /// Returns the request middlewares for the server; the first one is outermost.
    fn middlewares(cfg: &Config) -> Vec<Box<dyn Middleware>> {
        vec![
            Box::new(crate::middleware::AccessLogMiddleware::new(cfg.is_prod())),
            Box::new(crate::middleware::PanicRecoverMiddleware::new()),
        ]
    }
}

/// Liveness view of the server that does not keep the router alive.
struct ServerLiveness {
    is_server_alive: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl liveness::Service for ServerLiveness {
    async fn is_alive(&self) -> bool {
        if !self.is_server_alive.load(Ordering::Relaxed) {
            warn!(
                component = "app",
                scope = "http_server",
                event = "gone_away",
                "http server has gone away"
            );
            return false;
        }
        true
    }
}
