// Shared helpers for end-to-end tests.

pub mod common;
pub mod server;

pub use common::*;
pub use server::DirectoryServer;
