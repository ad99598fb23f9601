// Package api provides config display controller.

use axum::{routing::get, Json, Router};
use std::sync::Arc;

use crate::config::Config;
use crate::http::Controller;

pub const CONFIG_PATH: &str = "/directory/config";

/// ShowConfigController displays the current configuration.
pub struct ShowConfigController {
    cfg: Arc<Config>,
}

impl ShowConfigController {
    /// Creates a new show config controller.
    pub fn new(cfg: Config) -> Self {
        Self { cfg: Arc::new(cfg) }
    }

    /// Handles GET /directory/config.
    async fn show_config(cfg: Arc<Config>) -> Json<Config> {
        Json(Config::clone(&cfg))
    }
}

impl Controller for ShowConfigController {
    fn add_route(&self, router: Router) -> Router {
        let cfg = self.cfg.clone();
        router.route(
            CONFIG_PATH,
            get(move || {
                let cfg = cfg.clone();
                async move { Self::show_config(cfg).await }
            }),
        )
    }
}
