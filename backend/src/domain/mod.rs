//! Domain primitives, services and ports.
//!
//! Purpose: define the Koder record, its schema rules and the use-case ports
//! consumed by inbound adapters. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Koder and friends: the stored record, drafts, changes and filters.
//! - KoderService: implementation of the driving ports over a repository.

pub mod error;
pub mod koder;
pub mod koder_filter;
pub mod koder_service;
pub mod ports;

pub use self::error::{Error, ErrorCode};
pub use self::koder::{
    DeleteOutcome, Koder, KoderCastError, KoderChanges, KoderDraft, KoderId, KoderValidationError,
    NewKoder, SchemaViolation, Sex,
};
pub use self::koder_filter::KoderFilter;
pub use self::koder_service::KoderService;
