//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into plain-text responses with a status
//! code per error category.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => error!(message = self.message(), "request failed"),
            ErrorCode::InvalidRequest => warn!(message = self.message(), "request rejected"),
            ErrorCode::NotFound => {}
        }

        let mut builder = HttpResponse::build(self.status_code());
        builder.content_type(ContentType::plaintext());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(self.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    //! Tests for HTTP error mapping.

    use super::*;
    use crate::middleware::trace::TraceId;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("Not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&err), status);
    }

    #[actix_web::test]
    async fn internal_error_text_is_returned_verbatim() {
        let error = Error::internal("Error adding book - no book found for ISBN 123");

        let response = ResponseError::error_response(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get(actix_web::http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/plain; charset=utf-8")
        );
        let body = to_bytes(response.into_body()).await.expect("body");
        assert_eq!(body.as_ref(), b"Error adding book - no book found for ISBN 123");
    }

    #[actix_web::test]
    async fn trace_id_in_scope_is_echoed_as_header() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000007"
            .parse()
            .expect("valid uuid");
        let error = TraceId::scope(trace_id, async { Error::not_found("Not found") }).await;

        let response = ResponseError::error_response(&error);
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        assert_eq!(header, Some("00000000-0000-0000-0000-000000000007"));
    }

    #[rstest]
    fn header_is_omitted_without_trace_id() {
        let response = ResponseError::error_response(&Error::not_found("Not found"));
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    }
}
