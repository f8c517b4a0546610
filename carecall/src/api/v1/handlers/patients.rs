//! v1 patient handlers: relayed records plus the derived dashboard views.

use axum::extract::{Path, State};

use crate::analytics::dashboard_analytics;
use crate::api::state::AppState;
use crate::api::v1::dto::{PatientAnalyticsResponse, PatientChartsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::charts::build_chart_specs;
use crate::error::{CareCallError, Result};
use crate::models::{Patient, Visit};
use crate::view::{LastVisitContext, PatientProfile, VisitHighlights};

fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CareCallError::Validation("Patient id cannot be empty".into()));
    }
    Ok(id)
}

async fn load_visits(state: &AppState, patient_id: &str) -> Result<Vec<Visit>> {
    let patient_id = require_id(patient_id)?;
    state.store.list_visits(patient_id).await
}

/// `GET /api/v1/patients`
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    tag = "patients",
    operation_id = "patients.list",
    responses(
        (status = 200, description = "All patients", body = Vec<Patient>),
        (status = 502, description = "Record store failed", body = ApiError),
    )
)]
pub async fn list_patients(State(state): State<AppState>) -> ApiResponse<Vec<Patient>> {
    match state.store.list_patients().await {
        Ok(patients) => ApiResponse::success(patients),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}`
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}",
    tag = "patients",
    operation_id = "patients.get",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient record", body = Patient),
        (status = 404, description = "Patient not found", body = ApiError),
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<Patient> {
    let result = match require_id(&patient_id) {
        Ok(id) => state.store.get_patient(id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(patient) => ApiResponse::success(patient),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}/profile`
///
/// The patient formatted for the profile panel.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}/profile",
    tag = "patients",
    operation_id = "patients.profile",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Profile panel", body = PatientProfile),
        (status = 404, description = "Patient not found", body = ApiError),
    )
)]
pub async fn get_patient_profile(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<PatientProfile> {
    let result = match require_id(&patient_id) {
        Ok(id) => state.store.get_patient(id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(patient) => ApiResponse::success(PatientProfile::from(&patient)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}/visits`
///
/// Newest first, as the store returns them.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}/visits",
    tag = "patients",
    operation_id = "patients.visits",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Visits, newest first", body = Vec<Visit>),
        (status = 502, description = "Record store failed", body = ApiError),
    )
)]
pub async fn list_patient_visits(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<Vec<Visit>> {
    match load_visits(&state, &patient_id).await {
        Ok(visits) => ApiResponse::success(visits),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}/analytics`
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}/analytics",
    tag = "analytics",
    operation_id = "patients.analytics",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Visit analytics, null under two visits", body = PatientAnalyticsResponse),
        (status = 502, description = "Record store failed", body = ApiError),
    )
)]
pub async fn get_patient_analytics(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<PatientAnalyticsResponse> {
    match load_visits(&state, &patient_id).await {
        Ok(visits) => ApiResponse::success(PatientAnalyticsResponse {
            visit_count: visits.len(),
            analytics: dashboard_analytics(&visits),
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}/charts`
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}/charts",
    tag = "analytics",
    operation_id = "patients.charts",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Chart specs, empty under two visits", body = PatientChartsResponse),
        (status = 502, description = "Record store failed", body = ApiError),
    )
)]
pub async fn get_patient_charts(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<PatientChartsResponse> {
    match load_visits(&state, &patient_id).await {
        Ok(visits) => ApiResponse::success(PatientChartsResponse {
            visit_count: visits.len(),
            charts: dashboard_analytics(&visits)
                .map(|a| build_chart_specs(&a))
                .unwrap_or_default(),
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}/visits/highlights`
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}/visits/highlights",
    tag = "patients",
    operation_id = "patients.visitHighlights",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Visit cards, newest first", body = Vec<VisitHighlights>),
        (status = 502, description = "Record store failed", body = ApiError),
    )
)]
pub async fn list_visit_highlights(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<Vec<VisitHighlights>> {
    match load_visits(&state, &patient_id).await {
        Ok(visits) => ApiResponse::success(visits.iter().map(VisitHighlights::build).collect()),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/patients/{patientId}/context`
///
/// What the next call should know about the last one.
#[utoipa::path(
    get,
    path = "/api/v1/patients/{patientId}/context",
    tag = "patients",
    operation_id = "patients.context",
    params(("patientId" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Last visit context", body = LastVisitContext),
        (status = 404, description = "No visits recorded", body = ApiError),
    )
)]
pub async fn get_last_visit_context(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResponse<LastVisitContext> {
    match load_visits(&state, &patient_id).await {
        Ok(visits) => match LastVisitContext::from_visits(&visits) {
            Some(context) => ApiResponse::success(context),
            None => ApiResponse::error(
                ErrorCode::NotFound,
                format!("No visits recorded for patient {}", patient_id.trim()),
            ),
        },
        Err(e) => e.into(),
    }
}
