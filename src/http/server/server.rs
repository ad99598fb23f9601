//! HTTP server implementation.
//

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};

use crate::config::{Config, ConfigTrait};
use crate::controller::controller::Controller;
use crate::controller::response;
use crate::middleware::middleware::Middleware;

const DEFAULT_NAME: &str = "activity-directory";
const DEFAULT_PORT: &str = "8000";

/// Server trait for HTTP server operations.
#[async_trait::async_trait]
pub trait Server: Send + Sync {
    /// Binds the configured address.
    async fn bind(&self) -> Result<TcpListener>;

    /// Serves requests on the listener until shutdown (blocking).
    async fn serve(&self, listener: TcpListener) -> Result<()>;
}

/// HTTP server implementation.
pub struct HttpServer {
    shutdown_token: CancellationToken,
    config: Config,
    router: Router,
}

impl HttpServer {
    /// Creates a new HTTP server.
    pub fn new(
        shutdown_token: CancellationToken,
        config: Config,
        controllers: Vec<Box<dyn Controller>>,
        middlewares: Vec<Box<dyn Middleware>>,
    ) -> Self {
        let router = Self::build_router(controllers);
        let router = Self::merge_middlewares(router, middlewares, config.request_timeout());

        Self {
            shutdown_token,
            config,
            router,
        }
    }

    fn name(&self) -> &str {
        self.config
            .api()
            .and_then(|api| api.name.as_deref())
            .unwrap_or(DEFAULT_NAME)
    }

    /// Resolves the listen address from `api.port`.
    fn addr(&self) -> Result<SocketAddr> {
        let port = self
            .config
            .api()
            .and_then(|api| api.port.as_deref())
            .unwrap_or(DEFAULT_PORT);

        // Ensure port starts with ':'
        let port = if port.starts_with(':') {
            port.to_string()
        } else {
            format!(":{}", port)
        };

        format!("0.0.0.0{}", port)
            .parse()
            .context("Failed to parse server address")
    }

    /// Builds the router with all controllers.
    fn build_router(controllers: Vec<Box<dyn Controller>>) -> Router {
        let mut router = Router::new();

        for controller in controllers {
            router = controller.add_route(router);
        }

        // Must follow the routes: method fallbacks attach to routes already added.
        router
            .fallback(response::not_found)
            .method_not_allowed_fallback(response::method_not_allowed)
    }

    /// Merges middlewares into the router.
    fn merge_middlewares(
        router: Router,
        middlewares: Vec<Box<dyn Middleware>>,
        request_timeout: Duration,
    ) -> Router {
        let mut result = router.layer(TimeoutLayer::new(request_timeout));

        // Apply middlewares in reverse order (first middleware is outermost)
        for middleware in middlewares.iter().rev() {
            result = middleware.apply(result);
        }

        result
    }
}

#[async_trait::async_trait]
impl Server for HttpServer {
    async fn bind(&self) -> Result<TcpListener> {
        let addr = self.addr()?;
        TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind TCP listener on {}", addr))
    }

    async fn serve(&self, listener: TcpListener) -> Result<()> {
        let name = self.name().to_string();
        let addr = listener
            .local_addr()
            .context("Failed to read listener address")?;

        info!(
            component = "server",
            event = "started",
            name = %name,
            addr = %addr,
            "server started"
        );

        let shutdown_token = self.shutdown_token.clone();
        let serve_future =
            axum::serve(listener, self.router.clone()).with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
            });

        if let Err(e) = serve_future.await {
            error!(
                component = "server",
                event = "listen_and_serve_failed",
                name = %name,
                addr = %addr,
                error = %e,
                "server failed to listen and serve"
            );
            return Err(e.into());
        }

        info!(
            component = "server",
            event = "stopped",
            name = %name,
            addr = %addr,
            "server stopped"
        );

        Ok(())
    }
}
