//! Error types for the Healthlog application

use thiserror::Error;

/// Input rejected before it reaches the trend or nutrition computations
///
/// Carries the offending field so the API layer can report it back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Arithmetic failure inside a computation
///
/// Validated input keeps every value finite and bounded, so this only fires
/// when something upstream let bad data through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("Non-finite {quantity} computed for {date}")]
    NonFinite {
        quantity: &'static str,
        date: chrono::NaiveDate,
    },
}

/// Authentication error types
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,
}
