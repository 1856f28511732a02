//! SurrealDB repository implementations.

mod analytics;
mod patient;
mod user;

pub use analytics::SurrealPatientAnalytics;
pub use patient::SurrealPatientRepository;
pub use user::SurrealUserRepository;
