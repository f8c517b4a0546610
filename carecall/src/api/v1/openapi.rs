use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::{analytics, charts, models, view, vocabulary};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareCall Dashboard API",
        version = "1.0.0",
        description = "Read model for the care-call dashboard: patient and visit records relayed from the record store, with visit analytics, chart data and display highlights.",
    ),
    paths(
        handlers::health::health_check,
        handlers::dashboard::get_stats,
        handlers::patients::list_patients,
        handlers::patients::get_patient,
        handlers::patients::get_patient_profile,
        handlers::patients::list_patient_visits,
        handlers::patients::list_visit_highlights,
        handlers::patients::get_patient_analytics,
        handlers::patients::get_patient_charts,
        handlers::patients::get_last_visit_context,
        handlers::visits::get_visit,
        handlers::visits::get_visit_detail,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Records
        models::DashboardStats,
        models::Patient,
        models::Condition,
        models::Medication,
        models::ScheduleEntry,
        models::FamilyMember,
        models::Caregiver,
        models::Preferences,
        models::Visit,
        models::VisitSummary,
        models::VisitMarkers,
        models::VisitAnalysis,
        models::ConversationContext,
        models::HospitalizationPrediction,
        // Derived
        dto::PatientAnalyticsResponse,
        dto::PatientChartsResponse,
        analytics::VisitAnalytics,
        analytics::TrendSeries,
        charts::ChartSlot,
        charts::ChartKind,
        charts::ChartSpec,
        charts::Dataset,
        view::PatientProfile,
        view::ConditionView,
        view::Highlight,
        view::VisitHighlights,
        view::VisitDetail,
        view::LastVisitContext,
        vocabulary::Status,
        vocabulary::Enthusiasm,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::StoreStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "dashboard", description = "Headline counts"),
        (name = "patients", description = "Patient records and their visit history"),
        (name = "analytics", description = "Visit analytics and chart data"),
        (name = "visits", description = "Single visit records"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
