//! One-off sample-data loader. Safe to run repeatedly: records whose
//! identifier already exists are skipped, never overwritten.

use anyhow::Context;
use chrono::{TimeZone, Utc};
use medrex_core::error::MedrexError;
use medrex_core::models::patient::{
    AppointmentLog, BloodGroup, CreatePatient, Gender, MedicalHistoryEntry, Prescription,
};
use medrex_core::repository::PatientRepository;
use medrex_db::repository::SurrealPatientRepository;
use medrex_db::DbManager;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("medrex=info".parse()?),
        )
        .init();

    let config = medrex_server_config();
    let manager = DbManager::connect(&config)
        .await
        .context("database connection failed")?;
    manager.migrate().await.context("migrations failed")?;

    let repo = SurrealPatientRepository::new(manager.client().clone());

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for patient in sample_patients() {
        let patient_id = patient.patient_id.clone();
        match repo.create(patient).await {
            Ok(_) => {
                tracing::info!(%patient_id, "seeded patient");
                inserted += 1;
            }
            Err(MedrexError::Duplicate { .. }) => {
                tracing::info!(%patient_id, "already present, skipping");
                skipped += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("seeding {patient_id}")),
        }
    }

    tracing::info!(inserted, skipped, "seed complete");
    Ok(())
}

fn medrex_server_config() -> medrex_db::DbConfig {
    let defaults = medrex_db::DbConfig::default();
    medrex_db::DbConfig {
        url: env_or("MEDREX_DB_URL", &defaults.url),
        namespace: env_or("MEDREX_DB_NAMESPACE", &defaults.namespace),
        database: env_or("MEDREX_DB_DATABASE", &defaults.database),
        username: env_or("MEDREX_DB_USERNAME", &defaults.username),
        password: env_or("MEDREX_DB_PASSWORD", &defaults.password),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn sample_patients() -> Vec<CreatePatient> {
    vec![
        CreatePatient {
            patient_id: "P001".into(),
            name: "John Doe".into(),
            age: 45,
            gender: Gender::Male,
            blood_group: Some(BloodGroup::OPos),
            department: Some("Cardiology".into()),
            contact_info: Some("john.doe@example.com".into()),
            allergies: vec!["Penicillin".into()],
            medical_history: vec![
                MedicalHistoryEntry {
                    condition: "Hypertension".into(),
                    diagnosis_date: Utc.with_ymd_and_hms(2022, 5, 12, 0, 0, 0).single(),
                    notes: Some("Controlled with medication".into()),
                },
                MedicalHistoryEntry {
                    condition: "High Cholesterol".into(),
                    diagnosis_date: Utc.with_ymd_and_hms(2023, 1, 20, 0, 0, 0).single(),
                    notes: None,
                },
            ],
            current_prescriptions: vec![Prescription {
                medication: "Lisinopril".into(),
                dosage: "10mg daily".into(),
                start_date: Utc.with_ymd_and_hms(2022, 5, 12, 0, 0, 0).single(),
                end_date: None,
            }],
            doctor_notes: vec!["Responding well to treatment".into()],
            appointment_logs: vec![AppointmentLog {
                date: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
                reason: "Quarterly checkup".into(),
                doctor: "Dr. Reyes".into(),
            }],
            appointment_reminders: vec![],
        },
        CreatePatient {
            patient_id: "P002".into(),
            name: "Jane Smith".into(),
            age: 34,
            gender: Gender::Female,
            blood_group: Some(BloodGroup::ANeg),
            department: Some("Neurology".into()),
            contact_info: Some("jane.smith@example.com".into()),
            allergies: vec![],
            medical_history: vec![MedicalHistoryEntry {
                condition: "Migraine".into(),
                diagnosis_date: Utc.with_ymd_and_hms(2021, 9, 3, 0, 0, 0).single(),
                notes: Some("Episodic, triggered by stress".into()),
            }],
            current_prescriptions: vec![Prescription {
                medication: "Sumatriptan".into(),
                dosage: "50mg as needed".into(),
                start_date: Utc.with_ymd_and_hms(2021, 9, 3, 0, 0, 0).single(),
                end_date: None,
            }],
            doctor_notes: vec![],
            appointment_logs: vec![
                AppointmentLog {
                    date: Utc.with_ymd_and_hms(2024, 1, 22, 14, 30, 0).unwrap(),
                    reason: "Follow-up".into(),
                    doctor: "Dr. Okafor".into(),
                },
                AppointmentLog {
                    date: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
                    reason: "MRI review".into(),
                    doctor: "Dr. Okafor".into(),
                },
            ],
            appointment_reminders: vec![],
        },
        CreatePatient {
            patient_id: "P003".into(),
            name: "Arun Patel".into(),
            age: 61,
            gender: Gender::Male,
            blood_group: Some(BloodGroup::BPos),
            department: Some("Cardiology".into()),
            contact_info: None,
            allergies: vec!["Aspirin".into(), "Latex".into()],
            medical_history: vec![
                MedicalHistoryEntry {
                    condition: "Hypertension".into(),
                    diagnosis_date: Utc.with_ymd_and_hms(2019, 11, 2, 0, 0, 0).single(),
                    notes: None,
                },
                MedicalHistoryEntry {
                    condition: "Type 2 Diabetes".into(),
                    diagnosis_date: Utc.with_ymd_and_hms(2020, 6, 18, 0, 0, 0).single(),
                    notes: Some("Diet-managed".into()),
                },
            ],
            current_prescriptions: vec![
                Prescription {
                    medication: "Metformin".into(),
                    dosage: "500mg twice daily".into(),
                    start_date: Utc.with_ymd_and_hms(2020, 6, 18, 0, 0, 0).single(),
                    end_date: None,
                },
                Prescription {
                    medication: "Lisinopril".into(),
                    dosage: "20mg daily".into(),
                    start_date: Utc.with_ymd_and_hms(2019, 11, 2, 0, 0, 0).single(),
                    end_date: None,
                },
            ],
            doctor_notes: vec!["Schedule annual stress test".into()],
            appointment_logs: vec![AppointmentLog {
                date: Utc.with_ymd_and_hms(2023, 12, 11, 11, 15, 0).unwrap(),
                reason: "Blood pressure review".into(),
                doctor: "Dr. Reyes".into(),
            }],
            appointment_reminders: vec![],
        },
    ]
}
