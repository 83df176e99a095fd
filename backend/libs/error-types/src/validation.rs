//! Validation error types
//!
//! Provides structured validation errors with field-level details
//! for input validation across all services. Only `message` crosses the
//! client boundary; field details stay in logs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Validation error with field-level details
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
#[error("Validation failed: {message}")]
pub struct ValidationError {
    /// High-level validation message
    pub message: String,

    /// Field-specific errors
    pub field_errors: HashMap<String, Vec<FieldError>>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Add a field error
    pub fn add_field_error(
        mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let error = FieldError {
            code: code.into(),
            message: message.into(),
        };

        self.field_errors.entry(field.into()).or_default().push(error);

        self
    }
}

/// Individual field validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Error code (e.g., "required", "invalid_format", "too_small")
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

/// Common validation rules
pub mod rules {
    use super::ValidationError;

    /// Validate a positive integer supplied as text
    ///
    /// Digit strings too large for `u64` saturate to `u64::MAX` so callers
    /// can clamp them like any other oversized value.
    pub fn validate_positive_int(field: &str, value: &str) -> Result<u64, ValidationError> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

        if !is_digits(digits) {
            let code = match trimmed.strip_prefix('-') {
                Some(rest) if is_digits(rest) => "too_small",
                _ => "invalid_format",
            };
            return Err(not_positive(field, code));
        }

        let parsed = digits.parse::<u64>().unwrap_or(u64::MAX);
        if parsed == 0 {
            return Err(not_positive(field, "too_small"));
        }

        Ok(parsed)
    }

    fn is_digits(text: &str) -> bool {
        !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
    }

    fn not_positive(field: &str, code: &str) -> ValidationError {
        let detail = if code == "too_small" {
            "Must be at least 1"
        } else {
            "Must be an integer"
        };
        ValidationError::new(format!("{} must be a positive integer", field))
            .add_field_error(field, code, detail)
    }

    /// Validate numeric range
    pub fn validate_range<T: PartialOrd + std::fmt::Display>(
        field: &str,
        value: T,
        min: Option<T>,
        max: Option<T>,
    ) -> Result<(), ValidationError> {
        if let Some(min) = min {
            if value < min {
                return Err(ValidationError::new(format!("{} must be at least {}", field, min))
                    .add_field_error(field, "too_small", format!("Must be at least {}", min)));
            }
        }

        if let Some(max) = max {
            if value > max {
                return Err(ValidationError::new(format!("{} must be at most {}", field, max))
                    .add_field_error(field, "too_large", format!("Must be at most {}", max)));
            }
        }

        Ok(())
    }
}
