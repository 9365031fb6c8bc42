//! Domain ports and supporting types for the hexagonal boundary.

mod koder_command;
mod koder_query;
mod koder_repository;

#[cfg(test)]
pub use koder_command::MockKoderCommand;
pub use koder_command::KoderCommand;
#[cfg(test)]
pub use koder_query::MockKoderQuery;
pub use koder_query::KoderQuery;
#[cfg(test)]
pub use koder_repository::MockKoderRepository;
pub use koder_repository::{KoderRepository, KoderRepositoryError};
