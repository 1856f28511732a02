//! Authentication configuration.
//!
//! The signing secret is injected here at construction time; it is the
//! only process-wide shared state of the auth layer and is read-only
//! after startup.

/// Configuration for session-token issuance and verification.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token signing and verification.
    pub token_secret: String,
    /// Session token lifetime in seconds (default: 3600 = 1 hour).
    pub token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_lifetime_secs: 3600,
        }
    }
}
