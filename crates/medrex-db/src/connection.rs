//! Connection handling for the backing store.
//!
//! Both binaries (server and seeder) go through [`DbManager::connect`]
//! followed by [`DbManager::migrate`], so a fresh store is usable the
//! moment either starts. Integration tests skip this module and run
//! migrations directly against an in-memory engine.

use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;

use crate::error::DbError;
use crate::schema;

/// Store connection settings. Values come from `MEDREX_DB_*`
/// environment variables at the server boundary.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket endpoint, host:port.
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root credentials for signin.
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "medrex".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Owns the live store session shared by every repository.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Open a WebSocket session, sign in as root, and select the
    /// configured namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        tracing::info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "store session ready"
        );

        Ok(Self { db })
    }

    /// Bring the schema up to date.
    pub async fn migrate(&self) -> Result<(), DbError> {
        schema::run_migrations(&self.db).await
    }

    /// The session handle repositories are built from.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
