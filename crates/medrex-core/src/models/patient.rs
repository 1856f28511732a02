//! Patient domain model — the primary business entity.
//!
//! API-facing field names are camelCase to match the wire format the
//! service exposes. `patient_id` is the immutable, store-enforced-unique
//! business key; it is distinct from any store-internal record id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// The eight ABO/Rh combinations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryEntry {
    pub condition: String,
    pub diagnosis_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub medication: String,
    pub dosage: String,
    pub start_date: Option<DateTime<Utc>>,
    /// `None` means the prescription is ongoing.
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentLog {
    pub date: DateTime<Utc>,
    pub reason: String,
    pub doctor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReminder {
    pub reminder_date: DateTime<Utc>,
    #[serde(default)]
    pub reminder_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub blood_group: Option<BloodGroup>,
    pub department: Option<String>,
    pub contact_info: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<MedicalHistoryEntry>,
    #[serde(default)]
    pub current_prescriptions: Vec<Prescription>,
    #[serde(default)]
    pub doctor_notes: Vec<String>,
    #[serde(default)]
    pub appointment_logs: Vec<AppointmentLog>,
    #[serde(default)]
    pub appointment_reminders: Vec<AppointmentReminder>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload. Timestamps are generated by the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub blood_group: Option<BloodGroup>,
    pub department: Option<String>,
    pub contact_info: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<MedicalHistoryEntry>,
    #[serde(default)]
    pub current_prescriptions: Vec<Prescription>,
    #[serde(default)]
    pub doctor_notes: Vec<String>,
    #[serde(default)]
    pub appointment_logs: Vec<AppointmentLog>,
    #[serde(default)]
    pub appointment_reminders: Vec<AppointmentReminder>,
}

/// Partial update payload.
///
/// Deliberately has no `patientId` field: the identifier is stripped
/// structurally, so it can never be changed through an update even if
/// the caller supplies it. Provided list fields replace the stored
/// lists wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub blood_group: Option<BloodGroup>,
    pub department: Option<String>,
    pub contact_info: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub medical_history: Option<Vec<MedicalHistoryEntry>>,
    pub current_prescriptions: Option<Vec<Prescription>>,
    pub doctor_notes: Option<Vec<String>>,
    pub appointment_logs: Option<Vec<AppointmentLog>>,
    pub appointment_reminders: Option<Vec<AppointmentReminder>>,
}

impl UpdatePatient {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.blood_group.is_none()
            && self.department.is_none()
            && self.contact_info.is_none()
            && self.allergies.is_none()
            && self.medical_history.is_none()
            && self.current_prescriptions.is_none()
            && self.doctor_notes.is_none()
            && self.appointment_logs.is_none()
            && self.appointment_reminders.is_none()
    }
}
