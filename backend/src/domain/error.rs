//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and plain-text bodies.

use std::fmt;

use crate::middleware::trace::TraceId;

/// Stable error category describing the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The submitted input failed validation before reaching storage.
    InvalidRequest,
    /// The requested book does not exist.
    NotFound,
    /// Metadata lookup or storage failed.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// Domain error payload.
///
/// The message is shown to the requesting client verbatim.
///
/// # Examples
/// ```
/// use bookbyte::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, substituting a generic message when `message` is
    /// blank.
    ///
    /// The trace identifier of the current request, if any, is captured.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: code.fallback_message().to_owned(),
            trace_id: current_trace_id(),
        })
    }

    /// Fallible constructor that rejects blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: current_trace_id(),
        })
    }

    /// Error category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier of the request that produced the error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn current_trace_id() -> Option<String> {
    TraceId::current().map(|id| id.to_string())
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::invalid(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case::missing(Error::not_found("gone"), ErrorCode::NotFound)]
    #[case::internal(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn try_new_rejects_blank_messages() {
        let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
        assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
    }

    #[rstest]
    fn new_substitutes_fallback_for_blank_messages() {
        let error = Error::not_found("");
        assert_eq!(error.message(), "Not found");
    }

    #[rstest]
    fn display_is_the_message() {
        let error = Error::internal("Error adding book - boom");
        assert_eq!(error.to_string(), "Error adding book - boom");
    }

    #[rstest]
    #[tokio::test]
    async fn trace_id_is_captured_inside_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
            .parse()
            .expect("valid UUID");
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000001"));
    }

    #[rstest]
    fn trace_id_is_absent_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }
}
