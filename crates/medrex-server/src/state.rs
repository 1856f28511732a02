//! Shared application state handed to every handler.

use std::sync::Arc;

use axum::http::HeaderMap;
use medrex_auth::token::{self, ValidatedClaims};
use medrex_auth::{AuthConfig, AuthService};
use medrex_core::error::MedrexError;
use medrex_db::repository::{
    SurrealPatientAnalytics, SurrealPatientRepository, SurrealUserRepository,
};
use surrealdb::engine::remote::ws::Client;

use crate::error::ApiError;

pub struct AppState {
    pub auth: AuthService<SurrealUserRepository<Client>>,
    pub patients: SurrealPatientRepository<Client>,
    pub analytics: SurrealPatientAnalytics<Client>,
    auth_config: AuthConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(db: surrealdb::Surreal<Client>, auth_config: AuthConfig) -> Self {
        Self {
            auth: AuthService::new(SurrealUserRepository::new(db.clone()), auth_config.clone()),
            patients: SurrealPatientRepository::new(db.clone()),
            analytics: SurrealPatientAnalytics::new(db),
            auth_config,
        }
    }

    /// Access guard: every protected handler calls this before touching
    /// the store. Missing token -> 401, invalid or expired -> 403.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<ValidatedClaims, ApiError> {
        let bearer = crate::guard::extract_bearer_token(headers)?;
        let claims = token::validate_session_token(bearer, &self.auth_config)
            .map_err(|_| MedrexError::InvalidToken)?;
        Ok(claims)
    }
}
