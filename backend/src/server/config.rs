//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use users_api::middleware::ErrorVerbosity;
use users_api::settings::ServerSettings;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verbosity: ErrorVerbosity,
    pub(crate) seed_users: bool,
}

impl ServerConfig {
    /// Construct a configuration that binds `bind_addr`, renders terse errors
    /// and seeds the sample users.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            verbosity: ErrorVerbosity::Terse,
            seed_users: true,
        }
    }

    /// Set how much of a failure error responses reveal.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: ErrorVerbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Choose whether the store starts with the sample users.
    #[must_use]
    pub fn with_seed_users(mut self, seed_users: bool) -> Self {
        self.seed_users = seed_users;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self::new(settings.bind_addr())
            .with_verbosity(settings.active_profiles().error_verbosity())
            .with_seed_users(!settings.skip_seed)
    }
}
