//! HTTP server configuration object.

use std::net::SocketAddr;

use koders::inbound::http::state::HttpState;

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Construct a server configuration serving `http_state` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }
}
