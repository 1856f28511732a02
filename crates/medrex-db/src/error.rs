//! Database-specific error types and conversions.

use medrex_core::error::MedrexError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate key: {entity}")]
    Duplicate { entity: String },
}

impl DbError {
    /// Map a write error to `Duplicate` when it was caused by a
    /// unique-index violation, leaving other failures untouched.
    pub(crate) fn on_write(err: surrealdb::Error, entity: &str) -> DbError {
        let msg = err.to_string();
        if msg.contains("already contains") {
            DbError::Duplicate {
                entity: entity.to_string(),
            }
        } else {
            DbError::Surreal(err)
        }
    }
}

impl From<DbError> for MedrexError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => MedrexError::NotFound { entity, id },
            DbError::Duplicate { entity } => MedrexError::Duplicate { entity },
            other => MedrexError::Store(other.to_string()),
        }
    }
}
