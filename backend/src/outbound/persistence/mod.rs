//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the domain's [`crate::domain::ports::KoderRepository`] port on
//! PostgreSQL via `diesel-async` with a `bb8` pool.
//!
//! - **Thin adapter**: translates between Diesel rows and domain types; the
//!   record schema is enforced in the domain before any call reaches here.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```no_run
//! use koders::outbound::persistence::{DbPool, DieselKoderRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), koders::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/koders")).await?;
//! pool.check_connection().await?;
//! let _repository = DieselKoderRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_koder_repository;
mod models;
mod pool;
mod schema;

pub use diesel_koder_repository::DieselKoderRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
