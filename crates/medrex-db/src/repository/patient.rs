//! SurrealDB implementation of [`PatientRepository`].
//!
//! Search composes a conjunctive WHERE expression from the parsed
//! filter configuration; filter values only ever travel as bind
//! parameters, never interpolated into the query text.

use chrono::Utc;
use medrex_core::error::MedrexResult;
use medrex_core::models::patient::{CreatePatient, Patient, UpdatePatient};
use medrex_core::repository::{PatientFilter, PatientRepository, SEARCH_LIMIT};
use surrealdb::{Connection, Surreal};

use crate::error::DbError;

/// SurrealDB implementation of the patient repository.
#[derive(Clone)]
pub struct SurrealPatientRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPatientRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PatientRepository for SurrealPatientRepository<C> {
    async fn create(&self, input: CreatePatient) -> MedrexResult<Patient> {
        // Pre-check for a friendlier duplicate error; the unique index
        // on patientId remains the atomic backstop.
        let mut existing = self
            .db
            .query("SELECT * FROM patient WHERE patientId = $patient_id")
            .bind(("patient_id", input.patient_id.clone()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<Patient> = existing.take(0).map_err(DbError::from)?;
        if !rows.is_empty() {
            return Err(DbError::Duplicate {
                entity: "patient".into(),
            }
            .into());
        }

        let now = Utc::now();
        let patient_id = input.patient_id.clone();
        let record = Patient {
            patient_id: input.patient_id,
            name: input.name,
            age: input.age,
            gender: input.gender,
            blood_group: input.blood_group,
            department: input.department,
            contact_info: input.contact_info,
            allergies: input.allergies,
            medical_history: input.medical_history,
            current_prescriptions: input.current_prescriptions,
            doctor_notes: input.doctor_notes,
            appointment_logs: input.appointment_logs,
            appointment_reminders: input.appointment_reminders,
            created_at: now,
            updated_at: now,
        };

        let result = self
            .db
            .query("CREATE patient CONTENT $data")
            .bind(("data", record))
            .await
            .map_err(|e| DbError::on_write(e, "patient"))?;

        let mut result = result
            .check()
            .map_err(|e| DbError::on_write(e, "patient"))?;

        let rows: Vec<Patient> = result.take(0).map_err(DbError::from)?;
        let stored = rows.into_iter().next().ok_or(DbError::NotFound {
            entity: "patient".into(),
            id: patient_id,
        })?;

        Ok(stored)
    }

    async fn get_by_patient_id(&self, patient_id: &str) -> MedrexResult<Patient> {
        let mut result = self
            .db
            .query("SELECT * FROM patient WHERE patientId = $patient_id")
            .bind(("patient_id", patient_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<Patient> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| {
                DbError::NotFound {
                    entity: "patient".into(),
                    id: patient_id.to_string(),
                }
                .into()
            })
    }

    async fn search(&self, filter: PatientFilter) -> MedrexResult<Vec<Patient>> {
        let mut clauses: Vec<&str> = Vec::new();

        // Exact identifier match wins over every other filter.
        if filter.patient_id.is_some() {
            clauses.push("patientId = $patient_id");
        } else {
            if filter.search.is_some() {
                clauses.push(
                    "(string::contains(string::lowercase(name), \
                     string::lowercase($search)) \
                     OR string::contains(string::lowercase(patientId), \
                     string::lowercase($search)))",
                );
            }
            if filter.min_age.is_some() {
                clauses.push("age >= $min_age");
            }
            if filter.max_age.is_some() {
                clauses.push("age <= $max_age");
            }
            if filter.gender.is_some() {
                clauses.push("gender = $gender");
            }
            if filter.department.is_some() {
                clauses.push(
                    "(department != NONE AND \
                     string::contains(string::lowercase(department), \
                     string::lowercase($department)))",
                );
            }
        }

        let query = if clauses.is_empty() {
            format!("SELECT * FROM patient LIMIT {SEARCH_LIMIT}")
        } else {
            format!(
                "SELECT * FROM patient WHERE {} LIMIT {SEARCH_LIMIT}",
                clauses.join(" AND ")
            )
        };

        let mut builder = self.db.query(query);
        if let Some(patient_id) = filter.patient_id {
            builder = builder.bind(("patient_id", patient_id));
        } else {
            if let Some(search) = filter.search {
                builder = builder.bind(("search", search));
            }
            if let Some(min_age) = filter.min_age {
                builder = builder.bind(("min_age", min_age));
            }
            if let Some(max_age) = filter.max_age {
                builder = builder.bind(("max_age", max_age));
            }
            if let Some(gender) = filter.gender {
                builder = builder.bind(("gender", gender));
            }
            if let Some(department) = filter.department {
                builder = builder.bind(("department", department));
            }
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<Patient> = result.take(0).map_err(DbError::from)?;
        Ok(rows)
    }

    async fn update(&self, patient_id: &str, input: UpdatePatient) -> MedrexResult<Patient> {
        let mut sets: Vec<&str> = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.age.is_some() {
            sets.push("age = $age");
        }
        if input.gender.is_some() {
            sets.push("gender = $gender");
        }
        if input.blood_group.is_some() {
            sets.push("bloodGroup = $blood_group");
        }
        if input.department.is_some() {
            sets.push("department = $department");
        }
        if input.contact_info.is_some() {
            sets.push("contactInfo = $contact_info");
        }
        if input.allergies.is_some() {
            sets.push("allergies = $allergies");
        }
        if input.medical_history.is_some() {
            sets.push("medicalHistory = $medical_history");
        }
        if input.current_prescriptions.is_some() {
            sets.push("currentPrescriptions = $current_prescriptions");
        }
        if input.doctor_notes.is_some() {
            sets.push("doctorNotes = $doctor_notes");
        }
        if input.appointment_logs.is_some() {
            sets.push("appointmentLogs = $appointment_logs");
        }
        if input.appointment_reminders.is_some() {
            sets.push("appointmentReminders = $appointment_reminders");
        }
        sets.push("updatedAt = $now");

        let query = format!(
            "UPDATE patient SET {} WHERE patientId = $patient_id RETURN AFTER",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(query)
            .bind(("patient_id", patient_id.to_string()))
            .bind(("now", Utc::now()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(age) = input.age {
            builder = builder.bind(("age", age));
        }
        if let Some(gender) = input.gender {
            builder = builder.bind(("gender", gender));
        }
        if let Some(blood_group) = input.blood_group {
            builder = builder.bind(("blood_group", blood_group));
        }
        if let Some(department) = input.department {
            builder = builder.bind(("department", department));
        }
        if let Some(contact_info) = input.contact_info {
            builder = builder.bind(("contact_info", contact_info));
        }
        if let Some(allergies) = input.allergies {
            builder = builder.bind(("allergies", allergies));
        }
        if let Some(medical_history) = input.medical_history {
            builder = builder.bind(("medical_history", medical_history));
        }
        if let Some(current_prescriptions) = input.current_prescriptions {
            builder = builder.bind(("current_prescriptions", current_prescriptions));
        }
        if let Some(doctor_notes) = input.doctor_notes {
            builder = builder.bind(("doctor_notes", doctor_notes));
        }
        if let Some(appointment_logs) = input.appointment_logs {
            builder = builder.bind(("appointment_logs", appointment_logs));
        }
        if let Some(appointment_reminders) = input.appointment_reminders {
            builder = builder.bind(("appointment_reminders", appointment_reminders));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<Patient> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| {
                DbError::NotFound {
                    entity: "patient".into(),
                    id: patient_id.to_string(),
                }
                .into()
            })
    }

    async fn delete(&self, patient_id: &str) -> MedrexResult<()> {
        let mut result = self
            .db
            .query("DELETE patient WHERE patientId = $patient_id RETURN BEFORE")
            .bind(("patient_id", patient_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let removed: Vec<Patient> = result.take(0).map_err(DbError::from)?;
        if removed.is_empty() {
            return Err(DbError::NotFound {
                entity: "patient".into(),
                id: patient_id.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
