//! HTTP error response handling
//!
//! Request/response sink: maps each taxonomy kind to a status code and
//! carries the shared `{kind, message}` body.

use crate::{ClientError, ErrorKind, ErrorSink};
use ::http::StatusCode;

/// Rendered HTTP error: status plus JSON body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpErrorResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpErrorResponse {
    pub fn content_type(&self) -> &'static str {
        "application/json"
    }
}

/// Request/response transport sink
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpErrorSink;

impl HttpErrorSink {
    /// Status code for a taxonomy kind
    pub fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorSink for HttpErrorSink {
    type Output = HttpErrorResponse;

    fn emit(&self, error: &ClientError) -> HttpErrorResponse {
        HttpErrorResponse {
            status: Self::status_for(error.kind),
            body: error.to_body(),
        }
    }
}
