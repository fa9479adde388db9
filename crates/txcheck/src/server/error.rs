use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use txcheck_core::{CoreError, LookupResult};

// ==============================================================================
// Error Type
// ==============================================================================

pub(crate) enum AppError {
    BadRequest(String),
    NotFound(String),
    /// Upstream chain API failed; the body is the indeterminate result so
    /// clients still see `found: null` alongside `error`.
    Upstream(LookupResult),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Upstream(result) => {
                return (StatusCode::BAD_GATEWAY, Json(result)).into_response();
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub(super) fn map_input_error(err: CoreError) -> AppError {
    match err {
        CoreError::InvalidInput(msg) => AppError::BadRequest(msg),
        other => AppError::Internal(other.to_string()),
    }
}
