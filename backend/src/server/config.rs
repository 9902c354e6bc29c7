//! HTTP server configuration object.

use std::net::SocketAddr;

use bookbyte::inbound::http::state::HttpState;

/// Everything the HTTP server needs to start.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Construct a server configuration from the listen address and the
    /// handler dependencies.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }
}
