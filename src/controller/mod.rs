// HTTP API controllers for the activity directory.

pub mod activities;
pub mod config;
pub mod controller;
pub mod metrics;
pub mod probe;
pub mod response;
pub mod signup;
pub mod unregister;

// Re-export controller types for convenience
pub use activities::ListActivitiesController;
pub use config::ShowConfigController;
pub use metrics::PrometheusMetricsController;
pub use probe::LivenessProbeController;
pub use response::{ErrorResponse, MessageResponse};
pub use signup::SignupController;
pub use unregister::UnregisterController;
