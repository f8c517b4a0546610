//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint returns an [`ApiResponse<T>`]:
//!
//! ```json
//! {
//!   "data": { ... },                                        // success only
//!   "error": { "code": "not_found", "message": "..." }     // failure only
//! }
//! ```
//!
//! Failures reported by the record store are relayed as `404 not_found` when
//! the store says the record does not exist and as `502 upstream_error`
//! otherwise. The store's own message is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::CareCallError;

/// Machine-readable error code, serialized as snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// HTTP 400.
    InvalidRequest,
    /// HTTP 404.
    NotFound,
    /// HTTP 500.
    InternalError,
    /// The record store failed or could not be reached. HTTP 502.
    UpstreamError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamError => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Safe to show to end users.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize v1 response");
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<CareCallError> for ApiResponse<T> {
    fn from(err: CareCallError) -> Self {
        if err.is_not_found() {
            tracing::debug!(error = %err, "Record not found upstream");
            let message = match err {
                CareCallError::NotFound(msg) => msg,
                CareCallError::Store(msg) => msg,
                _ => "Record not found".to_string(),
            };
            return ApiResponse::error(ErrorCode::NotFound, message);
        }

        match err {
            CareCallError::Validation(msg) => ApiResponse::error(ErrorCode::InvalidRequest, msg),

            ref upstream @ (CareCallError::Store(_)
            | CareCallError::Http(_)
            | CareCallError::Json(_)) => {
                tracing::error!(error = %upstream, "Record store request failed");
                ApiResponse::error(ErrorCode::UpstreamError, "The record store request failed")
            }

            ref internal @ (CareCallError::Io(_)
            | CareCallError::UrlParse(_)
            | CareCallError::Config(_)
            | CareCallError::Internal(_)
            | CareCallError::NotFound(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
