//! Koders REST API library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] owns the Koder record,
//! its validation rules and the ports; [`inbound`] adapts HTTP requests onto
//! the driving ports; [`outbound`] implements the driven store port.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{ObserverChain, RequireNonEmptyBody};
