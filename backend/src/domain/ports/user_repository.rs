//! Port abstraction for user storage adapters and their errors.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{User, UserId};

/// Errors surfaced by user storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// The backing store cannot be read or written, e.g. a poisoned lock.
    #[error("user store unavailable: {message}")]
    Unavailable { message: String },
}

impl UserPersistenceError {
    /// Helper for unavailable-store failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Flat list of users addressed by id.
///
/// Adapters do not enforce id uniqueness; callers check for an existing
/// record before calling [`UserRepository::save`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// First user with the given id, if any.
    async fn find_one(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Append `user` and hand it back unchanged.
    async fn save(&self, user: User) -> Result<User, UserPersistenceError>;

    /// Remove every user with the given id. Absent ids are not an error.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
