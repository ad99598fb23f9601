#[path = "k8s/probe/liveness/mod.rs"]
pub mod liveness;
#[cfg(test)]
mod tests;

pub mod app;
pub mod config;
pub mod controller;
pub mod directory;
pub mod http;
pub mod metrics;
pub mod middleware;
pub mod model;
pub mod shutdown;
