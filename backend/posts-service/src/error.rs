/// Error types for Posts Service
///
/// Handlers return [`AppError`], a thin wrapper around the shared
/// [`ServiceError`]. Rendering goes through the shared normalization and the
/// HTTP sink so HTTP bodies match what the WebSocket channel emits.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use error_types::{
    normalize, AuthError, DatabaseError, ErrorSink, HttpErrorSink, ServiceError, ValidationError,
};
use thiserror::Error;

use crate::metrics::errors::record_emitted;

/// Result type for posts-service handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct AppError(#[from] pub ServiceError);

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        let status = HttpErrorSink::status_for(self.0.kind());
        StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let client = normalize(&self.0);
        record_emitted("http", client.kind);

        let rendered = HttpErrorSink.emit(&client);
        let status = StatusCode::from_u16(rendered.status.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        HttpResponse::build(status)
            .content_type(rendered.content_type())
            .body(rendered.body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError(DatabaseError::from(err).into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(crate::services::storage_error(err))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError(err.into())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError(ServiceError::unauthenticated(err))
    }
}
