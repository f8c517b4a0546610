use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub store: StoreStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct StoreStatus {
    pub url: String,
    pub status: String,
}

/// `GET /api/v1/health`
///
/// The service itself is always `ok`; the store is probed with a stats read.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let store_status = match state.store.dashboard_stats().await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Record store health probe failed");
            "error"
        }
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: StoreStatus {
            url: state.config.store.base_url.clone(),
            status: store_status.to_string(),
        },
    })
}
