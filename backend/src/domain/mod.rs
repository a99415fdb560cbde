//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the user record, its derived views and the CRUD
//! use-cases independently of HTTP. Adapters depend on this module, never the
//! other way round.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure categories.
//! - User, UserDraft, NewUser — stored record and its validation pipeline.
//! - UserView — enriched projection with full name and age.
//! - MessageKey, Locale — what to say and in which language.
//! - UserService — the CRUD core every API version delegates to.

pub mod error;
pub mod messages;
pub mod ports;
pub mod user;
pub mod user_service;
pub mod user_view;

pub use self::error::{Error, ErrorCode};
pub use self::messages::{Locale, MessageKey};
pub use self::user::{
    NewUser, USER_NAME_MIN, User, UserDraft, UserId, UserName, UserValidationError,
};
pub use self::user_service::{CreatedUser, UserService};
pub use self::user_view::{FULL_NAME_PREFIX, UserView};
