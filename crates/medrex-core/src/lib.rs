//! medrex core — domain models, error taxonomy, repository traits, and
//! boundary validation shared across all crates.

pub mod error;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{MedrexError, MedrexResult};
