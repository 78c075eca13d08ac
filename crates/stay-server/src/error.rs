use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use stay_store::StoreError;
use stay_types::ModelError;

/// Request-path errors, mapped onto HTTP status codes.
///
/// Bodies follow the API's error shape: `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested record does not exist: 404.
    #[error("Not found")]
    NotFound,

    /// Malformed or incomplete request body: 400.
    #[error("{0}")]
    BadRequest(String),

    /// The payload could not be decoded into a record: 400.
    #[error("{0}")]
    Model(#[from] ModelError),

    /// Snapshot persistence failed: 500.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Model(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Server lifecycle errors (startup, config, shutdown).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
