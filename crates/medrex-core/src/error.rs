//! Error types for the medrex system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MedrexError {
    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate key: {entity}")]
    Duplicate { entity: String },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MedrexError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type MedrexResult<T> = Result<T, MedrexError>;
