//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! Diesel row structs (`models.rs`) and the table definitions (`schema.rs`)
//! stay private to this module; repositories only hand domain types across
//! the port boundary.
//!
//! ```ignore
//! use crm_backend::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/crm")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_customer_repository;
mod diesel_error_mapping;
mod diesel_picture_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_picture_repository::DieselPictureRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
