//! Authentication and authorization error types
//!
//! Identity is resolved upstream by the gateway; services only see whether
//! the forwarded identity is present, well-formed, and sufficient. Messages
//! returned to clients never say which of those checks failed in detail.

use thiserror::Error;

use crate::ErrorKind;

/// Authentication/Authorization errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing authentication credentials
    #[error("Authentication required")]
    MissingCredentials,

    /// Forwarded identity could not be parsed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Caller's role does not grant the action
    #[error("Insufficient permissions")]
    InsufficientPermissions { required: String, actual: String },

    /// Generic auth error (for security)
    #[error("Authentication failed")]
    Generic,
}

impl AuthError {
    /// Get safe error message for client
    /// This avoids leaking information about what specifically failed
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Authentication required",
            Self::InvalidCredentials | Self::Generic => "Authentication failed",
            Self::InsufficientPermissions { .. } => "Insufficient permissions",
        }
    }

    /// `Forbidden` for a known caller lacking a role, `Unauthenticated` otherwise
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientPermissions { .. } => ErrorKind::Forbidden,
            _ => ErrorKind::Unauthenticated,
        }
    }

    /// Log the error with appropriate context (no PII)
    pub fn log(&self) {
        match self {
            Self::InvalidCredentials => {
                tracing::debug!("Invalid credentials attempted");
            }
            Self::InsufficientPermissions { required, actual } => {
                tracing::warn!(
                    required = %required,
                    actual = %actual,
                    "Insufficient permissions"
                );
            }
            _ => {
                tracing::debug!(error = ?self, "Authentication error");
            }
        }
    }
}
