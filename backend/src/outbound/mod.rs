//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: process-local user store.
//! - **messages**: built-in message bundles.
//!
//! Adapters translate between domain types and their storage; they contain no
//! business logic.

pub mod messages;
pub mod persistence;
