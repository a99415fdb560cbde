//! Request middleware.
//!
//! Purpose: attach a request-scoped trace identifier and descriptor used for
//! log correlation and error rendering.

pub mod trace;

pub use trace::{ErrorVerbosity, RequestContext, Trace, TraceId};
