//! Driving port for Koder mutations.

use async_trait::async_trait;

use crate::domain::{DeleteOutcome, Error, Koder, KoderDraft, KoderId};

/// Domain use-case port for creating, updating and deleting Koder records.
///
/// Implementations validate drafts against the record schema before touching
/// the store and report violations as [`crate::domain::ErrorCode::ValidationError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KoderCommand: Send + Sync {
    /// Validate and store a new record.
    async fn create(&self, draft: KoderDraft) -> Result<Koder, Error>;

    /// Validate and apply the supplied fields; `None` when the record is absent.
    async fn update(&self, id: &KoderId, draft: KoderDraft) -> Result<Option<Koder>, Error>;

    /// Remove a record.
    async fn delete(&self, id: &KoderId) -> Result<DeleteOutcome, Error>;
}
