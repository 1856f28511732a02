//! Integration tests for the patient repository using in-memory SurrealDB.

use chrono::{TimeZone, Utc};
use medrex_core::error::MedrexError;
use medrex_core::models::patient::{
    AppointmentLog, CreatePatient, Gender, MedicalHistoryEntry, UpdatePatient,
};
use medrex_core::repository::{PatientFilter, PatientRepository};
use medrex_db::repository::SurrealPatientRepository;
use surrealdb::engine::local::Mem;
use surrealdb::Surreal;

async fn setup() -> SurrealPatientRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    medrex_db::run_migrations(&db).await.unwrap();
    SurrealPatientRepository::new(db)
}

fn draft(patient_id: &str, name: &str, age: u32) -> CreatePatient {
    CreatePatient {
        patient_id: patient_id.into(),
        name: name.into(),
        age,
        gender: Gender::Female,
        blood_group: None,
        department: None,
        contact_info: None,
        allergies: vec![],
        medical_history: vec![],
        current_prescriptions: vec![],
        doctor_notes: vec![],
        appointment_logs: vec![],
        appointment_reminders: vec![],
    }
}

#[tokio::test]
async fn create_and_fetch_patient() {
    let repo = setup().await;

    let created = repo
        .create(CreatePatient {
            department: Some("Cardiology".into()),
            allergies: vec!["Penicillin".into()],
            medical_history: vec![MedicalHistoryEntry {
                condition: "Asthma".into(),
                diagnosis_date: Some(Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap()),
                notes: Some("mild".into()),
            }],
            ..draft("P001", "Alice Johnson", 34)
        })
        .await
        .unwrap();

    assert_eq!(created.patient_id, "P001");
    assert_eq!(created.age, 34);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get_by_patient_id("P001").await.unwrap();
    assert_eq!(fetched.name, "Alice Johnson");
    assert_eq!(fetched.allergies, vec!["Penicillin".to_string()]);
    assert_eq!(fetched.medical_history.len(), 1);
    assert_eq!(fetched.medical_history[0].condition, "Asthma");
}

#[tokio::test]
async fn duplicate_identifier_rejected() {
    let repo = setup().await;

    repo.create(draft("P001", "Alice", 34)).await.unwrap();
    let err = repo.create(draft("P001", "Mallory", 40)).await.unwrap_err();
    assert!(matches!(err, MedrexError::Duplicate { .. }));

    // The second record was never stored.
    let stored = repo.get_by_patient_id("P001").await.unwrap();
    assert_eq!(stored.name, "Alice");
}

#[tokio::test]
async fn fetch_missing_patient_is_not_found() {
    let repo = setup().await;
    let err = repo.get_by_patient_id("P404").await.unwrap_err();
    assert!(matches!(err, MedrexError::NotFound { .. }));
}

#[tokio::test]
async fn update_merges_fields_and_protects_identifier() {
    let repo = setup().await;
    repo.create(draft("P001", "Alice", 34)).await.unwrap();

    let updated = repo
        .update(
            "P001",
            UpdatePatient {
                age: Some(36),
                department: Some("Neurology".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Provided fields replaced, everything else untouched.
    assert_eq!(updated.patient_id, "P001");
    assert_eq!(updated.age, 36);
    assert_eq!(updated.department.as_deref(), Some("Neurology"));
    assert_eq!(updated.name, "Alice");
}

#[tokio::test]
async fn update_replaces_list_fields_wholesale() {
    let repo = setup().await;
    repo.create(CreatePatient {
        allergies: vec!["Penicillin".into(), "Latex".into()],
        ..draft("P001", "Alice", 34)
    })
    .await
    .unwrap();

    let updated = repo
        .update(
            "P001",
            UpdatePatient {
                allergies: Some(vec!["Aspirin".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.allergies, vec!["Aspirin".to_string()]);
}

#[tokio::test]
async fn update_missing_patient_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update(
            "P404",
            UpdatePatient {
                age: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MedrexError::NotFound { .. }));
}

#[tokio::test]
async fn delete_is_permanent_and_not_repeatable() {
    let repo = setup().await;
    repo.create(draft("P001", "Alice", 34)).await.unwrap();

    repo.delete("P001").await.unwrap();

    let err = repo.get_by_patient_id("P001").await.unwrap_err();
    assert!(matches!(err, MedrexError::NotFound { .. }));

    // Re-deleting is NotFound, not a silent success.
    let err = repo.delete("P001").await.unwrap_err();
    assert!(matches!(err, MedrexError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// Search
// -----------------------------------------------------------------------

async fn seeded_repo() -> SurrealPatientRepository<surrealdb::engine::local::Db> {
    let repo = setup().await;
    repo.create(CreatePatient {
        gender: Gender::Female,
        department: Some("Cardiology".into()),
        ..draft("P001", "Alice Johnson", 34)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        gender: Gender::Male,
        department: Some("Neurology".into()),
        ..draft("P002", "Bob Smith", 45)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        gender: Gender::Male,
        department: Some("cardiology".into()),
        ..draft("P003", "Carlos Alvarez", 61)
    })
    .await
    .unwrap();
    repo
}

#[tokio::test]
async fn search_by_exact_identifier_ignores_other_filters() {
    let repo = seeded_repo().await;

    let hits = repo
        .search(PatientFilter {
            patient_id: Some("P002".into()),
            // These would exclude P002 if they were applied.
            min_age: Some(90),
            gender: Some(Gender::Female),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].patient_id, "P002");
}

#[tokio::test]
async fn search_substring_matches_name_or_identifier() {
    let repo = seeded_repo().await;

    // Case-insensitive name match.
    let hits = repo
        .search(PatientFilter {
            search: Some("alice".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].patient_id, "P001");

    // Identifier substring match.
    let hits = repo
        .search(PatientFilter {
            search: Some("P00".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn search_age_bounds_are_inclusive() {
    let repo = seeded_repo().await;

    let hits = repo
        .search(PatientFilter {
            min_age: Some(34),
            max_age: Some(45),
            ..Default::default()
        })
        .await
        .unwrap();

    let mut ids: Vec<_> = hits.iter().map(|p| p.patient_id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec!["P001", "P002"]);
}

#[tokio::test]
async fn search_filters_combine_conjunctively() {
    let repo = seeded_repo().await;

    let hits = repo
        .search(PatientFilter {
            gender: Some(Gender::Male),
            department: Some("cardio".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].patient_id, "P003");
}

#[tokio::test]
async fn empty_filter_returns_capped_arbitrary_records() {
    let repo = setup().await;
    for i in 0..12 {
        repo.create(draft(&format!("P{i:03}"), "Patient", 30 + i))
            .await
            .unwrap();
    }

    let hits = repo.search(PatientFilter::default()).await.unwrap();
    assert_eq!(hits.len(), 10);
}

#[tokio::test]
async fn nested_appointment_logs_roundtrip() {
    let repo = setup().await;
    let visit = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();

    repo.create(CreatePatient {
        appointment_logs: vec![AppointmentLog {
            date: visit,
            reason: "Follow-up".into(),
            doctor: "Dr. Reyes".into(),
        }],
        ..draft("P001", "Alice", 34)
    })
    .await
    .unwrap();

    let fetched = repo.get_by_patient_id("P001").await.unwrap();
    assert_eq!(fetched.appointment_logs.len(), 1);
    assert_eq!(fetched.appointment_logs[0].date, visit);
    assert_eq!(fetched.appointment_logs[0].doctor, "Dr. Reyes");
}
