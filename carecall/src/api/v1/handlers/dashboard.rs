use axum::extract::State;

use crate::api::state::AppState;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::models::DashboardStats;

/// `GET /api/v1/dashboard/stats`
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "dashboard",
    operation_id = "dashboard.stats",
    responses(
        (status = 200, description = "Headline counts", body = DashboardStats),
        (status = 502, description = "Record store failed", body = ApiError),
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> ApiResponse<DashboardStats> {
    match state.store.dashboard_stats().await {
        Ok(stats) => ApiResponse::success(stats),
        Err(e) => e.into(),
    }
}
