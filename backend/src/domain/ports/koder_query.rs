//! Driving port for Koder reads.
//!
//! Inbound adapters use this port to list and fetch records without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, Koder, KoderFilter, KoderId};

/// Domain use-case port for reading Koder records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KoderQuery: Send + Sync {
    /// Return the records matching `filter`.
    async fn list(&self, filter: &KoderFilter) -> Result<Vec<Koder>, Error>;

    /// Fetch a single record; `None` means no record has that identifier.
    async fn get_by_id(&self, id: &KoderId) -> Result<Option<Koder>, Error>;
}
