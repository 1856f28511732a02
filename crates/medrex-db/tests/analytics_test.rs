//! Integration tests for the four aggregation pipelines.

use chrono::{TimeZone, Utc};
use medrex_core::models::patient::{
    AppointmentLog, CreatePatient, Gender, MedicalHistoryEntry, Prescription,
};
use medrex_core::repository::{PatientAnalytics, PatientRepository};
use medrex_db::repository::{SurrealPatientAnalytics, SurrealPatientRepository};
use surrealdb::engine::local::Mem;
use surrealdb::Surreal;

async fn setup() -> (
    SurrealPatientRepository<surrealdb::engine::local::Db>,
    SurrealPatientAnalytics<surrealdb::engine::local::Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    medrex_db::run_migrations(&db).await.unwrap();
    (
        SurrealPatientRepository::new(db.clone()),
        SurrealPatientAnalytics::new(db),
    )
}

fn draft(patient_id: &str, age: u32) -> CreatePatient {
    CreatePatient {
        patient_id: patient_id.into(),
        name: format!("Patient {patient_id}"),
        age,
        gender: Gender::Other,
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

fn condition(name: &str) -> MedicalHistoryEntry {
    MedicalHistoryEntry {
        condition: name.into(),
        diagnosis_date: None,
        notes: None,
    }
}

fn prescription(medication: &str) -> Prescription {
    Prescription {
        medication: medication.into(),
        dosage: "10mg".into(),
        start_date: None,
        end_date: None,
    }
}

fn visit(year: i32, month: u32) -> AppointmentLog {
    AppointmentLog {
        date: Utc.with_ymd_and_hms(year, month, 10, 9, 0, 0).unwrap(),
        reason: "Checkup".into(),
        doctor: "Dr. Reyes".into(),
    }
}

#[tokio::test]
async fn empty_store_yields_empty_summaries() {
    let (_repo, analytics) = setup().await;

    assert!(analytics.condition_counts().await.unwrap().is_empty());
    assert!(analytics.prescription_counts().await.unwrap().is_empty());
    assert!(analytics
        .average_age_per_department()
        .await
        .unwrap()
        .is_empty());
    assert!(analytics.visits_per_month().await.unwrap().is_empty());
}

#[tokio::test]
async fn condition_counts_flatten_and_rank_descending() {
    let (repo, analytics) = setup().await;

    // One row per (patient, condition) occurrence: Asthma appears
    // twice for P001 and once for P002.
    repo.create(CreatePatient {
        medical_history: vec![condition("Asthma"), condition("Asthma")],
        ..draft("P001", 34)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        medical_history: vec![condition("Asthma"), condition("Diabetes")],
        ..draft("P002", 45)
    })
    .await
    .unwrap();
    repo.create(draft("P003", 61)).await.unwrap();

    let rows = analytics.condition_counts().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].condition, "Asthma");
    assert_eq!(rows[0].count, 3);
    assert_eq!(rows[1].condition, "Diabetes");
    assert_eq!(rows[1].count, 1);
}

#[tokio::test]
async fn prescription_counts_rank_descending() {
    let (repo, analytics) = setup().await;

    repo.create(CreatePatient {
        current_prescriptions: vec![prescription("Metformin")],
        ..draft("P001", 34)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        current_prescriptions: vec![prescription("Metformin"), prescription("Lisinopril")],
        ..draft("P002", 45)
    })
    .await
    .unwrap();

    let rows = analytics.prescription_counts().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].medication, "Metformin");
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[1].medication, "Lisinopril");
    assert_eq!(rows[1].count, 1);
}

#[tokio::test]
async fn average_age_excludes_missing_and_empty_departments() {
    let (repo, analytics) = setup().await;

    repo.create(CreatePatient {
        department: Some("Cardiology".into()),
        ..draft("P001", 30)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        department: Some("Cardiology".into()),
        ..draft("P002", 50)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        department: Some("Neurology".into()),
        ..draft("P003", 61)
    })
    .await
    .unwrap();
    // Excluded from every group and from the overall count.
    repo.create(CreatePatient {
        department: Some("".into()),
        ..draft("P004", 99)
    })
    .await
    .unwrap();
    repo.create(draft("P005", 99)).await.unwrap();

    let rows = analytics.average_age_per_department().await.unwrap();
    assert_eq!(rows.len(), 2);

    // Ascending by department name.
    assert_eq!(rows[0].department, "Cardiology");
    assert_eq!(rows[0].count, 2);
    assert!((rows[0].average_age - 40.0).abs() < f64::EPSILON);

    assert_eq!(rows[1].department, "Neurology");
    assert_eq!(rows[1].count, 1);
    assert!((rows[1].average_age - 61.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn visits_per_month_ascending_chronological() {
    let (repo, analytics) = setup().await;

    repo.create(CreatePatient {
        appointment_logs: vec![visit(2024, 3), visit(2024, 1)],
        ..draft("P001", 34)
    })
    .await
    .unwrap();
    repo.create(CreatePatient {
        appointment_logs: vec![visit(2024, 1), visit(2023, 12)],
        ..draft("P002", 45)
    })
    .await
    .unwrap();
    // No visits; must not contribute a bucket.
    repo.create(draft("P003", 61)).await.unwrap();

    let rows = analytics.visits_per_month().await.unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!((rows[0].year, rows[0].month, rows[0].count), (2023, 12, 1));
    assert_eq!((rows[1].year, rows[1].month, rows[1].count), (2024, 1, 2));
    assert_eq!((rows[2].year, rows[2].month, rows[2].count), (2024, 3, 1));
}
