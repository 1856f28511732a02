//! Route table.

mod analytics;
mod auth;
mod patients;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/patients",
            post(patients::create).get(patients::search),
        )
        .route(
            "/api/patients/:patient_id",
            get(patients::get_one)
                .put(patients::update)
                .delete(patients::remove),
        )
        .route("/api/analytics/conditions", get(analytics::conditions))
        .route(
            "/api/analytics/prescriptions",
            get(analytics::prescriptions),
        )
        .route(
            "/api/analytics/avg-age-per-department",
            get(analytics::avg_age_per_department),
        )
        .route(
            "/api/analytics/visits-per-month",
            get(analytics::visits_per_month),
        )
        .with_state(state)
}
