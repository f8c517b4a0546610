use axum::extract::{Path, State};

use crate::api::state::AppState;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::models::Visit;
use crate::view::VisitDetail;

/// `GET /api/v1/visits/{visitId}`
#[utoipa::path(
    get,
    path = "/api/v1/visits/{visitId}",
    tag = "visits",
    operation_id = "visits.get",
    params(("visitId" = String, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit record", body = Visit),
        (status = 404, description = "Visit not found", body = ApiError),
    )
)]
pub async fn get_visit(
    State(state): State<AppState>,
    Path(visit_id): Path<String>,
) -> ApiResponse<Visit> {
    if visit_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Visit id cannot be empty");
    }
    match state.store.get_visit(visit_id.trim()).await {
        Ok(visit) => ApiResponse::success(visit),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/visits/{visitId}/detail`
///
/// The visit formatted for the detail modal.
#[utoipa::path(
    get,
    path = "/api/v1/visits/{visitId}/detail",
    tag = "visits",
    operation_id = "visits.detail",
    params(("visitId" = String, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit detail", body = VisitDetail),
        (status = 404, description = "Visit not found", body = ApiError),
    )
)]
pub async fn get_visit_detail(
    State(state): State<AppState>,
    Path(visit_id): Path<String>,
) -> ApiResponse<VisitDetail> {
    if visit_id.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Visit id cannot be empty");
    }
    match state.store.get_visit(visit_id.trim()).await {
        Ok(visit) => ApiResponse::success(VisitDetail::build(&visit)),
        Err(e) => e.into(),
    }
}
