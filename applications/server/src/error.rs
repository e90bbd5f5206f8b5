/// Server error types
use axum::{
    extract::rejection::{BytesRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lumen_core::LumenError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Missing or malformed required input
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request rejected by an axum extractor (bad JSON, body too large, ...)
    #[error("Rejected request ({0}): {1}")]
    Rejected(StatusCode, String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] multer::Error),

    #[error("Database error: {0}")]
    Database(LumenError),

    /// Media file could not be written, read or removed
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LumenError> for ServerError {
    fn from(err: LumenError) -> Self {
        match err {
            LumenError::NotFound { entity, .. } => {
                ServerError::NotFound(format!("{} not found", entity))
            }
            LumenError::Duplicate(msg) => ServerError::Conflict(msg),
            other => ServerError::Database(other),
        }
    }
}

impl From<lumen_storage::StorageError> for ServerError {
    fn from(err: lumen_storage::StorageError) -> Self {
        ServerError::Database(err.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for ServerError {
    fn from(rejection: BytesRejection) -> Self {
        ServerError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Rejected(status, msg) => (status, msg),
            ServerError::Multipart(ref e) => {
                tracing::warn!("Multipart error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid multipart body: {}", e),
                )
            }
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
