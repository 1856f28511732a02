//! User domain model — the login principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff role recorded on the user. Every authenticated role has
/// identical access to protected operations; the role is carried in
/// the session token but not branched on.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    #[default]
    Receptionist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id PHC-format hash. The plaintext secret is never stored.
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    /// Already hashed by the auth layer before it reaches a repository.
    pub password_hash: String,
    pub role: Role,
}
