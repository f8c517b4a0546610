//! Wire types that only exist at the HTTP boundary.

use serde::Serialize;

use crate::analytics::VisitAnalytics;
use crate::charts::ChartSpec;

/// `GET /api/v1/patients/{patientId}/analytics`
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientAnalyticsResponse {
    pub visit_count: usize,
    /// `null` until the patient has at least two visits.
    pub analytics: Option<VisitAnalytics>,
}

/// `GET /api/v1/patients/{patientId}/charts`
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientChartsResponse {
    pub visit_count: usize,
    /// Empty until the patient has at least two visits.
    pub charts: Vec<ChartSpec>,
}
