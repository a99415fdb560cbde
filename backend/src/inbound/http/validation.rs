//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, non-numeric path segments) and domain
//! validation failures all become
//! [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
//! errors so the translator renders them uniformly.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::{Error, UserValidationError};

/// Aggregate every violation into one counted message.
///
/// # Examples
/// ```
/// use users_api::domain::UserValidationError;
/// use users_api::inbound::http::validation::rejected_body;
///
/// let err = rejected_body(&[
///     UserValidationError::NonPositiveId,
///     UserValidationError::BirthDateNotInPast,
/// ]);
/// assert_eq!(
///     err.message(),
///     "Validation failed with 2 error(s): ID must be positive; Birth Date should be in the past"
/// );
/// ```
pub fn rejected_body(violations: &[UserValidationError]) -> Error {
    let joined = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Error::invalid_request(format!(
        "Validation failed with {} error(s): {joined}",
        violations.len()
    ))
}

/// Error for a path id that can never identify a user.
pub fn rejected_id(err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejected request body");
    Error::invalid_request(format!("Malformed request body: {err}")).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejected path parameter");
    Error::invalid_request(format!("Invalid path parameter: {err}")).into()
}

/// JSON extractor configuration routing failures through the translator.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration routing failures through the translator.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn single_violation_is_counted() {
        let err = rejected_body(&[UserValidationError::NameTooShort { min: 2 }]);
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.message(),
            "Validation failed with 1 error(s): Name should have at least 2 characters"
        );
    }

    #[rstest]
    fn violations_keep_their_order() {
        let err = rejected_body(&[
            UserValidationError::NonPositiveId,
            UserValidationError::MissingName,
            UserValidationError::BirthDateNotInPast,
        ]);
        assert_eq!(
            err.message(),
            "Validation failed with 3 error(s): ID must be positive; Name is required; Birth Date should be in the past"
        );
    }

    #[rstest]
    fn non_positive_id_is_a_bad_request() {
        let err = rejected_id(&UserValidationError::NonPositiveId);
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "ID must be positive");
    }
}
