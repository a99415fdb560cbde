//! Domain ports and supporting types for the hexagonal boundary.

mod message_catalog;
mod user_repository;

pub use message_catalog::MessageCatalog;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
