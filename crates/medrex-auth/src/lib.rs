//! medrex auth — Argon2id credential hashing, HS256 session-token
//! issuance/validation, and the registration/login flows.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput};
pub use token::{SessionClaims, ValidatedClaims};
