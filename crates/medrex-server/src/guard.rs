//! Bearer-token extraction for the access guard.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use medrex_core::error::MedrexError;

/// Pull the bearer token out of the `Authorization` header.
///
/// A missing header (or one without the `Bearer ` scheme) is reported
/// as `MissingToken`; whether the token itself is valid is decided by
/// the signature check that follows.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, MedrexError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(MedrexError::MissingToken)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(MedrexError::MissingToken)?;

    Ok(token)
}
