//! End-to-end tests for the activity directory.
//!
//! Every test starts its own server on an ephemeral port with a freshly
//! seeded directory and drives it over HTTP.

mod cases_operational_test;
mod cases_unregister_test;

pub mod support;
