//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM
//! - **memory**: in-process repository for tests
//!
//! Adapters are thin translators between domain types and the backing store.
//! They contain no business logic.

pub mod memory;
pub mod persistence;
