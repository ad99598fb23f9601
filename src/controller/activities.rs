// Package api provides the activity listing controller.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::directory::Registry;
use crate::http::Controller;

pub const ACTIVITIES_PATH: &str = "/activities";

/// ListActivitiesController renders the whole directory.
pub struct ListActivitiesController {
    directory: Arc<dyn Registry>,
}

impl ListActivitiesController {
    /// Creates a new listing controller.
    pub fn new(directory: Arc<dyn Registry>) -> Self {
        Self { directory }
    }

    /// Handles GET /activities.
    async fn list(State(controller): State<Arc<Self>>) -> impl IntoResponse {
        Json(controller.directory.list())
    }
}

impl Controller for ListActivitiesController {
    fn add_route(&self, router: Router) -> Router {
        let controller = Arc::new(self.clone());
        router.route(
            ACTIVITIES_PATH,
            get(move || {
                let controller = controller.clone();
                async move { Self::list(State(controller)).await }
            }),
        )
    }
}

impl Clone for ListActivitiesController {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}
