//! API error type and the mapping from the core taxonomy to HTTP
//! status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medrex_core::error::MedrexError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Optional machine-oriented detail, rendered as `error` in the body.
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<MedrexError> for ApiError {
    fn from(err: MedrexError) -> Self {
        match err {
            MedrexError::NotFound { entity, .. } => Self::new(
                StatusCode::NOT_FOUND,
                format!("{} not found.", capitalize(&entity)),
            ),
            MedrexError::Duplicate { entity } => Self::bad_request(format!(
                "{} already exists.",
                capitalize(&entity)
            )),
            MedrexError::AuthenticationFailed => {
                Self::bad_request("Invalid username or password.")
            }
            MedrexError::MissingToken => Self::unauthorized("Authentication token required."),
            MedrexError::InvalidToken => Self::forbidden("Invalid or expired token."),
            MedrexError::Validation { field, message } => {
                Self::bad_request("Validation failed.").with_detail(format!("{field}: {message}"))
            }
            MedrexError::Store(detail) | MedrexError::Internal(detail) => {
                tracing::error!(%detail, "request failed on store/internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server error.").with_detail(detail)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => serde_json::json!({
                "message": self.message,
                "error": detail,
            }),
            None => serde_json::json!({ "message": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
