// Main directory application implementation.

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::Config;
use crate::directory::{InMemoryDirectory, Registry};
use crate::liveness::{self, Prober};
use crate::model::seed;
use crate::shutdown::GracefulShutdown;

use super::server::HttpServer;

/// Encapsulates the entire directory application state.
pub struct App {
    shutdown_token: CancellationToken,
    directory: Arc<dyn Registry>,
    probe: Arc<liveness::Probe>,
    server: Arc<HttpServer>,
}

impl App {
    /// Creates a new application instance seeded from configuration.
    pub async fn new(
        shutdown_token: CancellationToken,
        cfg: Config,
        probe: Arc<liveness::Probe>,
    ) -> Result<Self> {
        let activities = seed::from_config(&cfg)?;
        let directory: Arc<dyn Registry> = Arc::new(InMemoryDirectory::new(activities));

        let (activity_count, participant_count) = directory.stat();
        info!(
            component = "app",
            event = "directory_ready",
            activities = activity_count,
            participants = participant_count,
            "directory initialized"
        );

        let server = Arc::new(HttpServer::new(
            shutdown_token.clone(),
            cfg,
            directory.clone(),
            probe.clone(),
        ));

        Ok(Self {
            shutdown_token,
            directory,
            probe,
            server,
        })
    }

    /// Returns the directory shared with the HTTP controllers.
    pub fn directory(&self) -> Arc<dyn Registry> {
        self.directory.clone()
    }

    /// Binds the configured listen address.
    pub async fn bind(&self) -> Result<TcpListener> {
        self.server.bind().await
    }

    /// Serves the directory API on the listener in a task tracked by the graceful shutdown.
    pub fn serve(&self, listener: TcpListener, gsh: &GracefulShutdown) {
        // Register liveness target before serving.
        self.probe.watch(vec![self.server.liveness()]);

        let server = self.server.clone();
        let app_for_close = self.clone();

        gsh.spawn(async move {
            if let Err(e) = server.listen_and_serve(listener).await {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
            }

            app_for_close.close();
        });

        info!(
            component = "app",
            event = "started",
            "application lifecycle"
        );
    }

    /// Checks whether the HTTP server is still alive.
    pub fn is_alive(&self) -> bool {
        self.server.is_alive()
    }

    /// Releases application resources and propagates cancellation.
    pub fn close(&self) {
        let (activity_count, participant_count) = self.directory.stat();
        self.shutdown_token.cancel();

        info!(
            component = "app",
            event = "stopped",
            activities = activity_count,
            participants = participant_count,
            "application lifecycle"
        );
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            shutdown_token: self.shutdown_token.clone(),
            directory: self.directory.clone(),
            probe: self.probe.clone(),
            server: self.server.clone(),
        }
    }
}
