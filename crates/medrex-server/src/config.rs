//! Environment-driven server configuration with documented fallbacks.

use medrex_auth::AuthConfig;
use medrex_db::DbConfig;

/// Development-only fallback; override `MEDREX_TOKEN_SECRET` in any
/// real deployment.
const DEFAULT_TOKEN_SECRET: &str = "medrex-dev-secret";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Listening port (default: 8001).
    pub port: u16,
}

impl ServerConfig {
    /// Build configuration from environment variables, falling back to
    /// the defaults below:
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `MEDREX_DB_URL` | `127.0.0.1:8000` |
    /// | `MEDREX_DB_NAMESPACE` | `medrex` |
    /// | `MEDREX_DB_DATABASE` | `main` |
    /// | `MEDREX_DB_USERNAME` | `root` |
    /// | `MEDREX_DB_PASSWORD` | `root` |
    /// | `MEDREX_TOKEN_SECRET` | dev-only constant |
    /// | `MEDREX_PORT` | `8001` |
    pub fn from_env() -> Self {
        let db_defaults = DbConfig::default();
        let db = DbConfig {
            url: env_or("MEDREX_DB_URL", &db_defaults.url),
            namespace: env_or("MEDREX_DB_NAMESPACE", &db_defaults.namespace),
            database: env_or("MEDREX_DB_DATABASE", &db_defaults.database),
            username: env_or("MEDREX_DB_USERNAME", &db_defaults.username),
            password: env_or("MEDREX_DB_PASSWORD", &db_defaults.password),
        };

        let auth = AuthConfig {
            token_secret: env_or("MEDREX_TOKEN_SECRET", DEFAULT_TOKEN_SECRET),
            token_lifetime_secs: 3600,
        };

        let port = std::env::var("MEDREX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8001);

        Self { db, auth, port }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
