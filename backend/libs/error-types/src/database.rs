//! Database-specific error types
//!
//! Storage failures are always `Unknown` to clients; the variants here exist
//! for logs and retry decisions only.

use thiserror::Error;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection pool exhausted
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Connection error
    #[error("Database connection error")]
    ConnectionError {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Query rejected by the database (syntax, type mismatch, constraint)
    #[error("Query rejected: {message}")]
    QueryRejected {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic database error
    #[error("Database error: {message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convert from sqlx errors (when using sqlx)
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                Self::ConnectionError {
                    source: Box::new(err),
                }
            }
            sqlx::Error::Database(_) => {
                let message = err
                    .as_database_error()
                    .map(|db_err| db_err.message().to_string())
                    .unwrap_or_default();
                Self::QueryRejected {
                    message,
                    source: Some(Box::new(err)),
                }
            }
            _ => Self::Other {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
        }
    }
}
