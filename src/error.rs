//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::logic::{InvalidField, InvalidValueError, PipelineError};
use crate::predictor::ModelServiceError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    BadRequest(String),
    InvalidValues(Vec<InvalidField>),

    // Resource errors
    NotFound(String),

    // External service errors
    ExternalServiceError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, fields) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str(), None),
            AppError::InvalidValues(fields) => {
                tracing::warn!("Rejected telemetry with {} invalid field(s)", fields.len());
                (StatusCode::BAD_REQUEST, "Invalid telemetry values", Some(fields))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str(), None),
            AppError::ExternalServiceError(msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "External service error", None)
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let mut body = json!({
            "success": false,
            "error": error_message,
            "status": status.as_u16()
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, Json(body)).into_response()
    }
}

impl From<InvalidValueError> for AppError {
    fn from(err: InvalidValueError) -> Self {
        AppError::InvalidValues(err.fields)
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<ModelServiceError> for AppError {
    fn from(err: ModelServiceError) -> Self {
        match err {
            ModelServiceError::Unsupported(msg) => AppError::BadRequest(msg),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
