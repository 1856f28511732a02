//! Session-token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs signed with a server-held secret.
//! Nothing is persisted server-side; verification is purely
//! signature + expiry.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use medrex_core::models::user::{Role, User};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed session token for a logged-in user.
pub fn issue_session_token(user: &User, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.token_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Decode and verify a session token (signature + expiry).
pub fn decode_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.token_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp", "iat"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Verified claims — a newtype proving the token passed validation.
///
/// The access guard attaches this to the request context before any
/// protected operation runs.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub SessionClaims);

/// Entry point for the access guard. Purely stateless — no store
/// lookup is performed.
pub fn validate_session_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    decode_session_token(token, config).map(ValidatedClaims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: "unit-test-secret".into(),
            token_lifetime_secs: 3600,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: "$argon2id$unused".into(),
            role: Role::Doctor,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_roundtrip() {
        let config = test_config();
        let user = test_user();

        let token = issue_session_token(&user, &config).unwrap();
        let claims = decode_session_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Doctor);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn tampered_token_rejected() {
        let config = test_config();
        let token = issue_session_token(&test_user(), &config).unwrap();

        let tampered = format!("{token}x");
        assert!(matches!(
            validate_session_token(&tampered, &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn wrong_secret_rejected() {
        let config = test_config();
        let token = issue_session_token(&test_user(), &config).unwrap();

        let other = AuthConfig {
            token_secret: "a-different-secret".into(),
            ..test_config()
        };
        assert!(validate_session_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let config = AuthConfig {
            token_lifetime_secs: 0,
            ..test_config()
        };
        let token = issue_session_token(&test_user(), &config).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert!(matches!(
            decode_session_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }
}
