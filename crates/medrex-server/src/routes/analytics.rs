//! Read-only aggregation endpoints.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use medrex_core::repository::{
    ConditionCount, DepartmentAgeStats, MonthlyVisits, PatientAnalytics, PrescriptionCount,
};

use crate::error::ApiResult;
use crate::state::SharedState;

pub async fn conditions(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<ConditionCount>>> {
    state.authorize(&headers)?;
    Ok(Json(state.analytics.condition_counts().await?))
}

pub async fn prescriptions(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<PrescriptionCount>>> {
    state.authorize(&headers)?;
    Ok(Json(state.analytics.prescription_counts().await?))
}

pub async fn avg_age_per_department(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<DepartmentAgeStats>>> {
    state.authorize(&headers)?;
    Ok(Json(state.analytics.average_age_per_department().await?))
}

pub async fn visits_per_month(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<MonthlyVisits>>> {
    state.authorize(&headers)?;
    Ok(Json(state.analytics.visits_per_month().await?))
}
