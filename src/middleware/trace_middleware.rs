//! Access log middleware.

use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// AccessLogMiddleware emits one span per request and logs the response status.
pub struct AccessLogMiddleware {
    level: Level,
}

impl AccessLogMiddleware {
    /// Creates a new access log middleware. Production logs at DEBUG to keep INFO quiet.
    pub fn new(is_prod: bool) -> Self {
        Self {
            level: if is_prod { Level::DEBUG } else { Level::INFO },
        }
    }
}

impl crate::middleware::middleware::Middleware for AccessLogMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(self.level))
                .on_response(DefaultOnResponse::new().level(self.level)),
        )
    }
}
