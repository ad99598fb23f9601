// Package api provides the unregister controller.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, State,
    },
    response::{IntoResponse, Response},
    routing::delete,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use super::response::MessageResponse;
use super::signup::{membership_request, QueryPairs};
use crate::directory::Registry;
use crate::http::Controller;
use crate::metrics;

pub const UNREGISTER_PATH: &str = "/activities/:activity_name/unregister";

/// UnregisterController removes participants from activities.
pub struct UnregisterController {
    directory: Arc<dyn Registry>,
}

impl UnregisterController {
    /// Creates a new unregister controller.
    pub fn new(directory: Arc<dyn Registry>) -> Self {
        Self { directory }
    }

    /// Handles DELETE /activities/{activity_name}/unregister?email=...
    async fn unregister(
        path: Result<Path<String>, PathRejection>,
        query: Result<QueryPairs, QueryRejection>,
        State(controller): State<Arc<Self>>,
    ) -> Response {
        let (name, email) = match membership_request(path, query) {
            Ok(request) => request,
            Err(e) => return e.into_response(),
        };

        match controller.directory.unregister(&name, &email) {
            Ok(()) => {
                metrics::inc_unregisters(metrics::OUTCOME_OK);
                info!(
                    component = "unregister",
                    event = "unregistered",
                    activity = %name,
                    email = %email,
                    "participant unregistered"
                );
                Json(MessageResponse::new(format!("Unregistered {} from {}", email, name)))
                    .into_response()
            }
            Err(e) => {
                metrics::inc_unregisters(e.outcome());
                info!(
                    component = "unregister",
                    event = "rejected",
                    activity = %name,
                    email = %email,
                    reason = e.outcome(),
                    "unregister rejected"
                );
                e.into_response()
            }
        }
    }
}

impl Controller for UnregisterController {
    fn add_route(&self, router: Router) -> Router {
        let controller = Arc::new(self.clone());
        router.route(
            UNREGISTER_PATH,
            delete(
                move |path: Result<Path<String>, PathRejection>,
                      query: Result<QueryPairs, QueryRejection>| {
                    let controller = controller.clone();
                    async move { Self::unregister(path, query, State(controller)).await }
                },
            ),
        )
    }
}

impl Clone for UnregisterController {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}
