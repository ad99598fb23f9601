// Application wiring: directory, probe and HTTP server.

#[allow(clippy::module_inception)]
pub mod app;
pub mod server;

pub use app::App;
pub use server::HttpServer;
