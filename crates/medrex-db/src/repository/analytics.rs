//! SurrealDB implementation of [`PatientAnalytics`].
//!
//! Each pipeline flattens a nested list field with SPLIT and groups in
//! the store (the unwind-group pattern); final ordering of the grouped
//! rows is applied in memory for deterministic output.

use medrex_core::error::MedrexResult;
use medrex_core::repository::{
    ConditionCount, DepartmentAgeStats, MonthlyVisits, PatientAnalytics, PrescriptionCount,
};
use serde::Deserialize;
use surrealdb::{Connection, Surreal};

use crate::error::DbError;

#[derive(Debug, Deserialize)]
struct NamedCountRow {
    name: Option<String>,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    department: String,
    average_age: f64,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct MonthRow {
    year: i32,
    month: u32,
    count: u64,
}

/// SurrealDB implementation of the four aggregation pipelines.
#[derive(Clone)]
pub struct SurrealPatientAnalytics<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPatientAnalytics<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Shared unwind-group query over one nested list field.
    ///
    /// SPLIT only applies to fields in the selection, so the inner
    /// select projects the list down to one value per element and the
    /// outer select groups the flattened rows.
    async fn grouped_counts(
        &self,
        list_field: &str,
        name_field: &str,
    ) -> Result<Vec<NamedCountRow>, DbError> {
        let query = format!(
            "SELECT name, count() AS count FROM \
             (SELECT {list_field}.{name_field} AS name \
              FROM patient WHERE {list_field} != [] SPLIT name) \
             GROUP BY name"
        );
        let mut result = self.db.query(query).await?;
        let rows: Vec<NamedCountRow> = result.take(0)?;
        Ok(rows)
    }
}

impl<C: Connection> PatientAnalytics for SurrealPatientAnalytics<C> {
    async fn condition_counts(&self) -> MedrexResult<Vec<ConditionCount>> {
        let rows = self
            .grouped_counts("medicalHistory", "condition")
            .await
            .map_err(DbError::from)?;

        let mut out: Vec<ConditionCount> = rows
            .into_iter()
            .filter_map(|r| {
                r.name.map(|condition| ConditionCount {
                    condition,
                    count: r.count,
                })
            })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count).then(a.condition.cmp(&b.condition)));
        Ok(out)
    }

    async fn prescription_counts(&self) -> MedrexResult<Vec<PrescriptionCount>> {
        let rows = self
            .grouped_counts("currentPrescriptions", "medication")
            .await
            .map_err(DbError::from)?;

        let mut out: Vec<PrescriptionCount> = rows
            .into_iter()
            .filter_map(|r| {
                r.name.map(|medication| PrescriptionCount {
                    medication,
                    count: r.count,
                })
            })
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count).then(a.medication.cmp(&b.medication)));
        Ok(out)
    }

    async fn average_age_per_department(&self) -> MedrexResult<Vec<DepartmentAgeStats>> {
        let mut result = self
            .db
            .query(
                "SELECT department, math::mean(age) AS average_age, \
                 count() AS count \
                 FROM patient \
                 WHERE department != NONE AND department != '' \
                 GROUP BY department",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DepartmentRow> = result.take(0).map_err(DbError::from)?;
        let mut out: Vec<DepartmentAgeStats> = rows
            .into_iter()
            .map(|r| DepartmentAgeStats {
                department: r.department,
                average_age: r.average_age,
                count: r.count,
            })
            .collect();
        out.sort_by(|a, b| a.department.cmp(&b.department));
        Ok(out)
    }

    async fn visits_per_month(&self) -> MedrexResult<Vec<MonthlyVisits>> {
        // Flatten to one row per visit date, then bucket by calendar
        // (year, month) in the outer select.
        let mut result = self
            .db
            .query(
                "SELECT time::year(<datetime> date) AS year, \
                 time::month(<datetime> date) AS month, \
                 count() AS count FROM \
                 (SELECT appointmentLogs.date AS date \
                  FROM patient WHERE appointmentLogs != [] SPLIT date) \
                 GROUP BY year, month",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MonthRow> = result.take(0).map_err(DbError::from)?;
        let mut out: Vec<MonthlyVisits> = rows
            .into_iter()
            .map(|r| MonthlyVisits {
                year: r.year,
                month: r.month,
                count: r.count,
            })
            .collect();
        out.sort_by(|a, b| (a.year, a.month).cmp(&(b.year, b.month)));
        Ok(out)
    }
}
