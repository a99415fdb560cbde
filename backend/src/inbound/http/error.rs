//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning every
//! failure into the uniform `{timestamp, message, details}` payload. How much
//! of the failure is revealed follows the [`ErrorVerbosity`] of the request
//! context installed by the trace middleware.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{ErrorVerbosity, RequestContext};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message shown in place of unclassified failures outside development.
pub const SUPPORT_MESSAGE: &str = "An unexpected error occurred. Please contact support.";

const UNKNOWN_REQUEST: &str = "uri=unknown";

/// Error payload returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    /// When the failure was translated (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Reason for the failure, sanitised outside development.
    pub message: String,
    /// Request descriptor, e.g. `uri=/users/9`.
    pub details: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `404 NOT_FOUND` style label for a status.
fn status_label(status: StatusCode) -> String {
    let reason = status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_ascii_uppercase()
        .replace([' ', '-'], "_");
    format!("{} {reason}", status.as_u16())
}

/// Message revealed to the client for `error` at `verbosity`.
fn client_message(error: &Error, verbosity: ErrorVerbosity) -> String {
    match (verbosity, error.code().is_classified()) {
        (ErrorVerbosity::Verbose, true) => format!(
            "{} \"{}\"",
            status_label(status_for(error.code())),
            error.message()
        ),
        (ErrorVerbosity::Verbose, false) => error.message().to_owned(),
        (ErrorVerbosity::Terse, true) => error.message().to_owned(),
        (ErrorVerbosity::Terse, false) => SUPPORT_MESSAGE.to_owned(),
    }
}

/// Build the client payload for `error` under `context`.
fn translate(error: &Error, context: Option<&RequestContext>) -> ErrorDetails {
    let verbosity = context.map(RequestContext::verbosity).unwrap_or_default();
    let details = context.map_or_else(|| UNKNOWN_REQUEST.to_owned(), RequestContext::describe);
    ErrorDetails {
        timestamp: Utc::now(),
        message: client_message(error, verbosity),
        details,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let context = RequestContext::current();
        let trace_id = context.as_ref().map(|c| c.trace_id().to_string());
        let uri = context.as_ref().map(RequestContext::uri);
        if self.code().is_classified() {
            warn!(code = %self.code(), message = %self.message(), ?trace_id, ?uri, "request failed");
        } else {
            error!(message = %self.message(), ?trace_id, ?uri, "unexpected failure");
        }

        HttpResponse::build(self.status_code()).json(translate(self, context.as_ref()))
    }
}
