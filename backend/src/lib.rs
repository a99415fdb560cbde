//! Versioned users API library.
//!
//! Layout follows a hexagonal split: [`domain`] holds records, use-cases and
//! ports; [`outbound`] implements the ports; [`inbound`] exposes the HTTP
//! surface; [`middleware`] carries request-scoped context.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
