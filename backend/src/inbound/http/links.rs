//! Absolute link construction for `Location` headers and HAL envelopes.
//!
//! Each versioned scope registers a [`RoutePrefix`] as app data; unversioned
//! routes have none and link to `/users`.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::UserId;

/// Path prefix of the scope a handler is mounted under, e.g. `/v3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoutePrefix(pub &'static str);

/// Builds absolute user URLs from the request's scheme, host and prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    collection: String,
}

impl Links {
    /// Links rooted at `origin` (scheme and host) under `prefix`.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    /// use users_api::inbound::http::links::Links;
    ///
    /// let links = Links::new("http://localhost:8080", "/v3");
    /// assert_eq!(links.collection(), "http://localhost:8080/v3/users");
    /// let id = UserId::new(4).expect("valid id");
    /// assert_eq!(links.user(id), "http://localhost:8080/v3/users/4");
    /// ```
    pub fn new(origin: &str, prefix: &str) -> Self {
        Self {
            collection: format!("{}{prefix}/users", origin.trim_end_matches('/')),
        }
    }

    /// URL of the user collection.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// URL of a single user.
    pub fn user(&self, id: UserId) -> String {
        format!("{}/{id}", self.collection)
    }
}

impl FromRequest for Links {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let prefix = req.app_data::<RoutePrefix>().copied().unwrap_or_default();
        let info = req.connection_info();
        let origin = format!("{}://{}", info.scheme(), info.host());
        ready(Ok(Self::new(&origin, prefix.0)))
    }
}
