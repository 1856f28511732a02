//! Authentication error types.

use medrex_core::error::MedrexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Returned for both unknown-username and wrong-password so the
    /// two cases are indistinguishable to the caller.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for MedrexError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => MedrexError::AuthenticationFailed,
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => MedrexError::InvalidToken,
            AuthError::Crypto(msg) => MedrexError::Internal(msg),
        }
    }
}
