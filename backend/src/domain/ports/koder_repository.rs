//! Driven port for Koder persistence adapters and their errors.
//!
//! Adapters receive values that already passed the record schema; they only
//! translate them to and from the backing store.

use async_trait::async_trait;

use crate::domain::{Koder, KoderChanges, KoderFilter, KoderId, NewKoder};

/// Persistence errors raised by Koder store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KoderRepositoryError {
    /// Store connection could not be established.
    #[error("{message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("{message}")]
    Query { message: String },
    /// The store rejected the document through one of its own constraints.
    #[error("{message}")]
    Constraint { message: String },
}

impl KoderRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a constraint error with the given message.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }
}

/// Port for storing and retrieving Koder records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KoderRepository: Send + Sync {
    /// Return every record matching `filter`, in creation order.
    async fn list(&self, filter: &KoderFilter) -> Result<Vec<Koder>, KoderRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &KoderId) -> Result<Option<Koder>, KoderRepositoryError>;

    /// Insert a new record under `id` and return it as stored.
    async fn insert(&self, id: &KoderId, koder: &NewKoder) -> Result<Koder, KoderRepositoryError>;

    /// Apply non-empty `changes` and return the updated record, or `None`
    /// when no record has that identifier.
    async fn update(
        &self,
        id: &KoderId,
        changes: &KoderChanges,
    ) -> Result<Option<Koder>, KoderRepositoryError>;

    /// Remove a record, reporting whether one existed.
    async fn delete(&self, id: &KoderId) -> Result<bool, KoderRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KoderRepositoryError::connection("pool timed out"), "pool timed out")]
    #[case(KoderRepositoryError::query("syntax error"), "syntax error")]
    #[case(KoderRepositoryError::constraint("koders_age_range"), "koders_age_range")]
    fn errors_display_their_message_verbatim(
        #[case] error: KoderRepositoryError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }
}
