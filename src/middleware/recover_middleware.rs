//! Panic recovery middleware.
//

use axum::{http::StatusCode, response::Response, Router};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::controller::ErrorResponse;

/// Global panic counter.
static PANICS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Gets the current panic counter value.
pub fn panics_counter() -> u64 {
    PANICS_COUNTER.load(Ordering::Relaxed)
}

/// Increments the panic counter.
pub fn inc_panics() {
    PANICS_COUNTER.fetch_add(1, Ordering::Relaxed);
    crate::metrics::inc_panics();
}

/// Turns a caught handler panic into a generic 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    inc_panics();

    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!(
        component = "recover-middleware",
        event = "panic_recovered",
        reason = reason,
        total = panics_counter(),
        "handler panicked"
    );

    ErrorResponse::new("Internal Server Error").into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}

/// PanicRecoverMiddleware recovers from panics in HTTP handlers.
pub struct PanicRecoverMiddleware;

impl PanicRecoverMiddleware {
    /// Creates a new panic recovery middleware.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanicRecoverMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

// Implementation of Middleware trait
impl crate::middleware::middleware::Middleware for PanicRecoverMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(CatchPanicLayer::custom(handle_panic))
    }
}
