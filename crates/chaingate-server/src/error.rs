use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use chaingate_core::{ErrorKind, QueryError};

/// A failed connector query on its way out as an HTTP response.
///
/// The status code comes from the error kind:
/// * `Validation` -> 400 Bad Request
/// * `NotConnected`, `Transport`, `Protocol` -> 503 Service Unavailable
///
/// Body:
/// ```json
/// { "error": "invalid Ethereum address: ...", "kind": "validation" }
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub QueryError);

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    pub fn status(&self) -> StatusCode {
        if self.kind().is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        tracing::warn!(%status, %kind, error = %self.0, "query failed");
        (status, Json(json!({ "error": self.0.to_string(), "kind": kind }))).into_response()
    }
}
