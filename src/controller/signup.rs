// Package api provides the sign-up controller.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

use super::response::MessageResponse;
use crate::directory::Registry;
use crate::http::Controller;
use crate::metrics;
use crate::model::{ActivityName, Email, RequestError};

pub const SIGNUP_PATH: &str = "/activities/:activity_name/signup";

/// Decoded query pairs of the membership endpoints.
pub type QueryPairs = Query<Vec<(String, String)>>;

/// Turns the extracted path and query into the activity and participant.
pub(crate) fn membership_request(
    path: Result<Path<String>, PathRejection>,
    query: Result<QueryPairs, QueryRejection>,
) -> Result<(ActivityName, Email), RequestError> {
    let Path(activity_name) = path?;
    let Query(pairs) = query?;
    Ok((ActivityName::new(activity_name), Email::from_query_pairs(pairs)?))
}

/// SignupController adds participants to activities.
pub struct SignupController {
    directory: Arc<dyn Registry>,
}

impl SignupController {
    /// Creates a new sign-up controller.
    pub fn new(directory: Arc<dyn Registry>) -> Self {
        Self { directory }
    }

    /// Handles POST /activities/{activity_name}/signup?email=...
    async fn signup(
        path: Result<Path<String>, PathRejection>,
        query: Result<QueryPairs, QueryRejection>,
        State(controller): State<Arc<Self>>,
    ) -> Response {
        let (name, email) = match membership_request(path, query) {
            Ok(request) => request,
            Err(e) => return e.into_response(),
        };

        match controller.directory.sign_up(&name, &email) {
            Ok(()) => {
                metrics::inc_signups(metrics::OUTCOME_OK);
                info!(
                    component = "signup",
                    event = "signed_up",
                    activity = %name,
                    email = %email,
                    "participant signed up"
                );
                Json(MessageResponse::new(format!("Signed up {} for {}", email, name)))
                    .into_response()
            }
            Err(e) => {
                metrics::inc_signups(e.outcome());
                info!(
                    component = "signup",
                    event = "rejected",
                    activity = %name,
                    email = %email,
                    reason = e.outcome(),
                    "sign-up rejected"
                );
                e.into_response()
            }
        }
    }
}

impl Controller for SignupController {
    fn add_route(&self, router: Router) -> Router {
        let controller = Arc::new(self.clone());
        router.route(
            SIGNUP_PATH,
            post(
                move |path: Result<Path<String>, PathRejection>,
                      query: Result<QueryPairs, QueryRejection>| {
                    let controller = controller.clone();
                    async move { Self::signup(path, query, State(controller)).await }
                },
            ),
        )
    }
}

impl Clone for SignupController {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}
