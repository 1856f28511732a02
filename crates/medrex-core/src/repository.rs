//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Services are generic over these
//! traits so neither the auth layer nor the HTTP layer depends on the
//! database crate.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::MedrexResult;
use crate::models::patient::{CreatePatient, Gender, Patient, UpdatePatient};
use crate::models::user::{CreateUser, User};

/// Hard cap on search results. There is no pagination beyond this.
pub const SEARCH_LIMIT: usize = 10;

/// Parsed, strongly-typed search filter configuration.
///
/// All recognized filters combine conjunctively, with one exception:
/// when `patient_id` is present it takes precedence and every other
/// filter is ignored.
#[derive(Debug, Clone, Default)]
pub struct PatientFilter {
    /// Exact match on the public identifier.
    pub patient_id: Option<String>,
    /// Case-insensitive substring match against name OR identifier.
    pub search: Option<String>,
    /// Inclusive lower bound on age.
    pub min_age: Option<u32>,
    /// Inclusive upper bound on age.
    pub max_age: Option<u32>,
    /// Exact match on gender.
    pub gender: Option<Gender>,
    /// Case-insensitive substring match on department.
    pub department: Option<String>,
}

// ---------------------------------------------------------------------------
// Analytics summary rows
// ---------------------------------------------------------------------------

/// One grouped row of the condition-frequency pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConditionCount {
    pub condition: String,
    pub count: u64,
}

/// One grouped row of the medication-frequency pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrescriptionCount {
    pub medication: String,
    pub count: u64,
}

/// Per-department mean age and member count. Patients with an absent
/// or empty department are excluded entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAgeStats {
    pub department: String,
    pub average_age: f64,
    pub count: u64,
}

/// Visit count for one calendar (year, month).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyVisits {
    pub year: i32,
    pub month: u32,
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `Duplicate` if the username exists.
    fn create(&self, input: CreateUser) -> impl Future<Output = MedrexResult<User>> + Send;
    fn get_by_username(&self, username: &str)
    -> impl Future<Output = MedrexResult<User>> + Send;
}

pub trait PatientRepository: Send + Sync {
    /// Persist a new patient. Fails with `Duplicate` if the public
    /// identifier collides.
    fn create(&self, input: CreatePatient) -> impl Future<Output = MedrexResult<Patient>> + Send;
    fn get_by_patient_id(&self, patient_id: &str)
    -> impl Future<Output = MedrexResult<Patient>> + Send;
    /// Filtered search, capped at [`SEARCH_LIMIT`] records.
    fn search(
        &self,
        filter: PatientFilter,
    ) -> impl Future<Output = MedrexResult<Vec<Patient>>> + Send;
    /// Shallow field-level merge; the public identifier is immutable.
    fn update(
        &self,
        patient_id: &str,
        input: UpdatePatient,
    ) -> impl Future<Output = MedrexResult<Patient>> + Send;
    /// Permanent removal. Fails with `NotFound` if nothing matched,
    /// including a repeated delete.
    fn delete(&self, patient_id: &str) -> impl Future<Output = MedrexResult<()>> + Send;
}

/// The four fixed aggregation pipelines over the patient collection.
/// All are pure reads; empty input yields empty output, never an error.
pub trait PatientAnalytics: Send + Sync {
    /// Condition frequency, descending by count.
    fn condition_counts(&self)
    -> impl Future<Output = MedrexResult<Vec<ConditionCount>>> + Send;
    /// Medication frequency, descending by count.
    fn prescription_counts(
        &self,
    ) -> impl Future<Output = MedrexResult<Vec<PrescriptionCount>>> + Send;
    /// Mean age per department, ascending by department name.
    fn average_age_per_department(
        &self,
    ) -> impl Future<Output = MedrexResult<Vec<DepartmentAgeStats>>> + Send;
    /// Visit counts per calendar month, ascending chronologically.
    fn visits_per_month(&self) -> impl Future<Output = MedrexResult<Vec<MonthlyVisits>>> + Send;
}
