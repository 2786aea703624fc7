//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: a mutex-guarded store used without a database and in tests
//!
//! Adapters only translate between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
