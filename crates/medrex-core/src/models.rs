//! Domain models for medrex.
//!
//! These are the core types shared across all crates.

pub mod patient;
pub mod user;
