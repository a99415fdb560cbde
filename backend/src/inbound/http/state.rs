//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain use-cases and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::MessageCatalog;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<UserService>,
    pub messages: Arc<dyn MessageCatalog>,
}

impl HttpState {
    /// Construct state from the user use-cases and the message catalogue
    /// used for locale negotiation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use users_api::domain::UserService;
    /// use users_api::domain::ports::MessageCatalog;
    /// use users_api::inbound::http::state::HttpState;
    /// use users_api::outbound::messages::StaticMessageCatalog;
    /// use users_api::outbound::persistence::InMemoryUserRepository;
    ///
    /// let messages: Arc<dyn MessageCatalog> = Arc::new(StaticMessageCatalog);
    /// let users = Arc::new(UserService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     messages.clone(),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(users, messages);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<UserService>, messages: Arc<dyn MessageCatalog>) -> Self {
        Self { users, messages }
    }
}
