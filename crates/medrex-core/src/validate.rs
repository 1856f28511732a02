//! Boundary validation invoked before any store write.
//!
//! Enum constraints are enforced by the typed payloads at parse time;
//! these functions cover the required/non-empty rules with field-level
//! detail.

use crate::error::{MedrexError, MedrexResult};
use crate::models::patient::{CreatePatient, UpdatePatient};

/// Upper bound used as a sanity check on submitted ages.
const MAX_AGE: u32 = 150;

pub fn validate_registration(username: &str, password: &str) -> MedrexResult<()> {
    if username.trim().is_empty() {
        return Err(MedrexError::validation("username", "must not be empty"));
    }
    if password.is_empty() {
        return Err(MedrexError::validation("password", "must not be empty"));
    }
    Ok(())
}

pub fn validate_new_patient(input: &CreatePatient) -> MedrexResult<()> {
    if input.patient_id.trim().is_empty() {
        return Err(MedrexError::validation("patientId", "must not be empty"));
    }
    if input.name.trim().is_empty() {
        return Err(MedrexError::validation("name", "must not be empty"));
    }
    validate_age(input.age)
}

/// Re-validate the fields a partial update would merge. Required
/// fields cannot be removed (the payload is typed), so checking the
/// provided values is sufficient.
pub fn validate_patient_update(input: &UpdatePatient) -> MedrexResult<()> {
    if input.is_empty() {
        return Err(MedrexError::validation("body", "no updatable fields provided"));
    }
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(MedrexError::validation("name", "must not be empty"));
        }
    }
    if let Some(age) = input.age {
        validate_age(age)?;
    }
    Ok(())
}

fn validate_age(age: u32) -> MedrexResult<()> {
    if age > MAX_AGE {
        return Err(MedrexError::validation("age", "out of range"));
    }
    Ok(())
}
