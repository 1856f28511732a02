//! Registration and login handlers — the only unauthenticated routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use medrex_auth::{LoginInput, RegisterInput};
use medrex_core::models::user::Role;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<SharedState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(body) = body.map_err(bad_body)?;

    state
        .auth
        .register(RegisterInput {
            username: body.username,
            password: body.password,
            role: body.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully." })),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(body) = body.map_err(bad_body)?;
    let username = body.username.clone();

    let out = state
        .auth
        .login(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    tracing::info!(%username, "login succeeded");
    Ok(Json(json!({
        "message": "Login successful.",
        "token": out.token,
        "expiresIn": out.expires_in,
    })))
}

pub(super) fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
}
