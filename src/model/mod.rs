// Package model provides the activity record, boundary types and seed loading.

pub mod activity;
pub mod names;
pub mod seed;


// Re-export main types
pub use activity::{Activities, Activity};
pub use names::{ActivityName, Email, RequestError};
pub use seed::SeedError;
