use axum::{routing::get, Router};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let patients = Router::new()
        .route("/", get(handlers::patients::list_patients))
        .route("/{patientId}", get(handlers::patients::get_patient))
        .route(
            "/{patientId}/profile",
            get(handlers::patients::get_patient_profile),
        )
        .route(
            "/{patientId}/visits",
            get(handlers::patients::list_patient_visits),
        )
        .route(
            "/{patientId}/visits/highlights",
            get(handlers::patients::list_visit_highlights),
        )
        .route(
            "/{patientId}/analytics",
            get(handlers::patients::get_patient_analytics),
        )
        .route(
            "/{patientId}/charts",
            get(handlers::patients::get_patient_charts),
        )
        .route(
            "/{patientId}/context",
            get(handlers::patients::get_last_visit_context),
        );

    let visits = Router::new()
        .route("/{visitId}", get(handlers::visits::get_visit))
        .route("/{visitId}/detail", get(handlers::visits::get_visit_detail));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route("/dashboard/stats", get(handlers::dashboard::get_stats))
        .nest("/patients", patients)
        .nest("/visits", visits)
}
