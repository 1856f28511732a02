//! Authentication service — registration and login orchestration.

use medrex_core::error::{MedrexError, MedrexResult};
use medrex_core::models::user::{CreateUser, Role};
use medrex_core::repository::UserRepository;
use medrex_core::validate;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    /// Defaults to [`Role::Receptionist`] when absent.
    pub role: Option<Role>,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed session token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Register a new user. The plaintext secret is hashed before it
    /// reaches the store; registration does not log the caller in.
    pub async fn register(&self, input: RegisterInput) -> MedrexResult<()> {
        validate::validate_registration(&input.username, &input.password)?;

        let password_hash =
            password::hash_password(&input.password).map_err(MedrexError::from)?;

        self.user_repo
            .create(CreateUser {
                username: input.username,
                password_hash,
                role: input.role.unwrap_or_default(),
            })
            .await?;

        Ok(())
    }

    /// Authenticate a user and issue a session token.
    ///
    /// Unknown usernames and wrong passwords both collapse into the
    /// same `AuthenticationFailed` to avoid username enumeration.
    pub async fn login(&self, input: LoginInput) -> MedrexResult<LoginOutput> {
        let user = match self.user_repo.get_by_username(&input.username).await {
            Ok(u) => u,
            Err(MedrexError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(&input.password, &user.password_hash)
            .map_err(MedrexError::from)?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_session_token(&user, &self.config).map_err(MedrexError::from)?;

        Ok(LoginOutput {
            token,
            expires_in: self.config.token_lifetime_secs,
        })
    }

    /// The token configuration shared with the access guard.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
