// Directory server bootstrap for end-to-end tests.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::{self, Config, ConfigTrait};
use crate::directory::Registry;
use crate::liveness;
use crate::shutdown::GracefulShutdown;

/// Directory server wrapper for tests.
pub struct DirectoryServer {
    base: String,
    app: App,
    shutdown_token: CancellationToken,
    graceful_shutdown: GracefulShutdown,
}

impl DirectoryServer {
    /// Starts a server with the test configuration.
    pub async fn start() -> Self {
        Self::start_with(config::new_test_config()).await
    }

    /// Starts a server with the given configuration on an ephemeral port.
    pub async fn start_with(cfg: Config) -> Self {
        let shutdown_token = CancellationToken::new();
        let graceful_shutdown =
            GracefulShutdown::new(shutdown_token.clone(), cfg.shutdown_timeout());
        let probe = Arc::new(liveness::Probe::new(cfg.probe_timeout()));

        let app = App::new(shutdown_token.clone(), cfg, probe)
            .await
            .expect("app should start");

        // Bound before serving, so requests queue until the accept loop runs.
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");

        app.serve(listener, &graceful_shutdown);

        Self {
            base: format!("http://{}", addr),
            app,
            shutdown_token,
            graceful_shutdown,
        }
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Directory backing the server.
    pub fn directory(&self) -> Arc<dyn Registry> {
        self.app.directory()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Stops the server and waits for the serve task to finish.
    pub async fn stop(self) {
        self.graceful_shutdown
            .cancel_and_await_with_timeout()
            .await
            .expect("server should stop within timeout");
    }
}

impl Drop for DirectoryServer {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
    }
}
