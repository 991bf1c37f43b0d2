//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite pulls these in with `mod support;`.

pub mod cluster_skip;
pub mod database;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use database::TestDatabase;
pub use embedded_postgres::{provision_template_database, shared_cluster};
