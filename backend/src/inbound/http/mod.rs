//! HTTP inbound adapter exposing the versioned users API.

pub mod error;
pub mod health;
pub mod links;
pub mod locale;
pub mod representation;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod versioning;

pub use error::ApiResult;
