// Package directory owns the in-memory activity directory.

pub mod error;
pub mod registry;


pub use error::DirectoryError;
pub use registry::{InMemoryDirectory, Registry};
