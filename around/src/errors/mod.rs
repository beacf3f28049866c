//! Error types for the HTTP handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use around_repository::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors a request handler can return.
///
/// Every variant is turned into an HTTP error response; none of them stop
/// the server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be decoded or had invalid parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The document store failed the operation.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// The HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::Store(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        } else {
            warn!(status = %status, error = %self, "Rejected request");
        }

        (
            status,
            Json(json!({
                "status": "error",
                "message": self.to_string()
            })),
        )
            .into_response()
    }
}
