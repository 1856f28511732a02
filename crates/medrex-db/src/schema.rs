//! Schema definitions and migration runner for SurrealDB.
//!
//! Both tables use SCHEMAFULL mode. Enums are stored as strings with
//! ASSERT constraints. Patient documents keep the camelCase field
//! names of the wire format; dates are stored as RFC 3339 strings and
//! cast with `<datetime>` inside aggregation queries.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users (login principals)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['admin', 'doctor', 'nurse', 'receptionist'];
DEFINE FIELD created_at ON TABLE user TYPE string;
DEFINE FIELD updated_at ON TABLE user TYPE string;
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;

-- =======================================================================
-- Patients
-- =======================================================================
DEFINE TABLE patient SCHEMAFULL;
DEFINE FIELD patientId ON TABLE patient TYPE string;
DEFINE FIELD name ON TABLE patient TYPE string;
DEFINE FIELD age ON TABLE patient TYPE int ASSERT $value >= 0;
DEFINE FIELD gender ON TABLE patient TYPE string \
    ASSERT $value IN ['Male', 'Female', 'Other'];
DEFINE FIELD bloodGroup ON TABLE patient TYPE option<string> \
    ASSERT $value == NONE OR $value IN \
    ['A+', 'A-', 'B+', 'B-', 'AB+', 'AB-', 'O+', 'O-'];
DEFINE FIELD department ON TABLE patient TYPE option<string>;
DEFINE FIELD contactInfo ON TABLE patient TYPE option<string>;
DEFINE FIELD allergies ON TABLE patient TYPE array DEFAULT [];
DEFINE FIELD allergies.* ON TABLE patient TYPE string;
DEFINE FIELD medicalHistory ON TABLE patient TYPE array DEFAULT [];
DEFINE FIELD medicalHistory.* ON TABLE patient TYPE object FLEXIBLE;
DEFINE FIELD currentPrescriptions ON TABLE patient TYPE array DEFAULT [];
DEFINE FIELD currentPrescriptions.* ON TABLE patient TYPE object FLEXIBLE;
DEFINE FIELD doctorNotes ON TABLE patient TYPE array DEFAULT [];
DEFINE FIELD doctorNotes.* ON TABLE patient TYPE string;
DEFINE FIELD appointmentLogs ON TABLE patient TYPE array DEFAULT [];
DEFINE FIELD appointmentLogs.* ON TABLE patient TYPE object FLEXIBLE;
DEFINE FIELD appointmentReminders ON TABLE patient TYPE array DEFAULT [];
DEFINE FIELD appointmentReminders.* ON TABLE patient TYPE object FLEXIBLE;
DEFINE FIELD createdAt ON TABLE patient TYPE string;
DEFINE FIELD updatedAt ON TABLE patient TYPE string;
DEFINE INDEX idx_patient_patient_id ON TABLE patient \
    COLUMNS patientId UNIQUE;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Query(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Query(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Query(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(version = migration.version, "Migration applied");
        }
    }

    Ok(())
}
