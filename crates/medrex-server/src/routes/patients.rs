//! Patient CRUD and filtered-search handlers. All routes here sit
//! behind the access guard.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use medrex_core::models::patient::{CreatePatient, Gender, Patient, UpdatePatient};
use medrex_core::repository::{PatientFilter, PatientRepository};
use medrex_core::validate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::routes::auth::bad_body;
use crate::state::SharedState;

/// Recognized search query parameters. Unknown parameters are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub patient_id: Option<String>,
    pub search: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
}

impl From<SearchQuery> for PatientFilter {
    fn from(q: SearchQuery) -> Self {
        PatientFilter {
            patient_id: q.patient_id,
            search: q.search,
            min_age: q.min_age,
            max_age: q.max_age,
            gender: q.gender,
            department: q.department,
        }
    }
}

pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Json<CreatePatient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    state.authorize(&headers)?;
    let Json(input) = body.map_err(bad_body)?;

    validate::validate_new_patient(&input)?;
    let stored = state.patients.create(input).await?;

    tracing::info!(patient_id = %stored.patient_id, "patient created");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn search(
    State(state): State<SharedState>,
    headers: HeaderMap,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Patient>>> {
    state.authorize(&headers)?;
    let Query(query) = query.map_err(bad_query)?;

    let found = state.patients.search(query.into()).await?;
    Ok(Json(found))
}

fn bad_query(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
}

pub async fn get_one(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<Patient>> {
    state.authorize(&headers)?;

    let patient = state.patients.get_by_patient_id(&patient_id).await?;
    Ok(Json(patient))
}

pub async fn update(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(patient_id): Path<String>,
    body: Result<Json<UpdatePatient>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    state.authorize(&headers)?;
    let Json(input) = body.map_err(bad_body)?;

    validate::validate_patient_update(&input)?;
    let updated = state.patients.update(&patient_id, input).await?;

    tracing::info!(%patient_id, "patient updated");
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.authorize(&headers)?;

    state.patients.delete(&patient_id).await?;

    tracing::info!(%patient_id, "patient deleted");
    Ok(Json(json!({ "message": "Patient deleted successfully." })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn malformed_query_maps_to_json_error_shape() {
        let uri: Uri = "/api/patients?minAge=abc".parse().unwrap();
        let rejection = Query::<SearchQuery>::try_from_uri(&uri).unwrap_err();

        let err = bad_query(rejection);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.starts_with("Invalid query string"));
    }

    #[test]
    fn recognized_parameters_parse_into_filter() {
        let uri: Uri = "/api/patients?minAge=30&maxAge=50&gender=Male"
            .parse()
            .unwrap();
        let Query(q) = Query::<SearchQuery>::try_from_uri(&uri).unwrap();

        let filter = PatientFilter::from(q);
        assert_eq!(filter.min_age, Some(30));
        assert_eq!(filter.max_age, Some(50));
        assert_eq!(filter.gender, Some(Gender::Male));
        assert!(filter.patient_id.is_none());
    }
}
