//! Request middleware.
//!
//! Purpose: define the request-lifecycle components wrapped around the HTTP
//! routes: ordered logging observers with trace propagation, and the
//! payload-presence check guarding record creation.

pub mod non_empty_body;
pub mod observers;

pub use non_empty_body::{EMPTY_BODY_MESSAGE, RequireNonEmptyBody};
pub use observers::{
    MarkerObserver, MethodObserver, ObserverChain, RequestObserver, TRACE_ID_HEADER, TraceId,
};

/// Marker logged by the second application-wide observer.
pub const GLOBAL_MARKER: &str = "second middleware";

/// Observers wrapped around every route: the request method first, then
/// [`GLOBAL_MARKER`].
#[must_use]
pub fn global_observers() -> ObserverChain {
    ObserverChain::new()
        .with(MethodObserver)
        .with(MarkerObserver::new(GLOBAL_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_chain_registers_method_then_marker() {
        assert_eq!(global_observers().labels(), ["method", "second middleware"]);
    }
}
