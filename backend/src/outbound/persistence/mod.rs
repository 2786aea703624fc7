//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin: they translate between Diesel row structs and
//! domain types and map database failures to the port error types. Row
//! structs (`models.rs`) and the schema (`schema.rs`) stay private to this
//! module.
//!
//! # Example
//!
//! ```ignore
//! use calendar_backend::outbound::persistence::{DbPool, DieselEventRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/calendar")).await?;
//! let events = DieselEventRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_event_repository;
mod diesel_token_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_token_repository::DieselTokenRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
