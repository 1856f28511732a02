//! SurrealDB implementation of [`UserRepository`].

use chrono::{DateTime, Utc};
use medrex_core::error::MedrexResult;
use medrex_core::models::user::{CreateUser, Role, User};
use medrex_core::repository::UserRepository;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct UserRow {
    username: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct UserRowWithId {
    record_id: String,
    username: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, id: Uuid) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid user UUID: {e}")))?;
        Ok(User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the user repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> MedrexResult<User> {
        // Pre-check for a friendlier duplicate error; the unique index
        // on username remains the atomic backstop.
        let mut existing = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user WHERE username = $username")
            .bind(("username", input.username.clone()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<UserRowWithId> = existing.take(0).map_err(DbError::from)?;
        if !rows.is_empty() {
            return Err(DbError::Duplicate {
                entity: "user".into(),
            }
            .into());
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now().to_rfc3339();

        let result = self
            .db
            .query(
                "CREATE type::thing('user', $id) SET \
                 username = $username, \
                 password_hash = $password_hash, \
                 role = $role, \
                 created_at = $now, \
                 updated_at = $now",
            )
            .bind(("id", id_str.clone()))
            .bind(("username", input.username))
            .bind(("password_hash", input.password_hash))
            .bind(("role", input.role))
            .bind(("now", now))
            .await
            .map_err(|e| DbError::on_write(e, "user"))?;

        let mut result = result.check().map_err(|e| DbError::on_write(e, "user"))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or(DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id))
    }

    async fn get_by_username(&self, username: &str) -> MedrexResult<User> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user WHERE username = $username")
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("username={username}"),
        })?;

        Ok(row.try_into_user()?)
    }
}
