use crate::config::ConfigError;
use crate::forms::{FeedbackServiceError, UnknownVariant};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Forms(FeedbackServiceError),
    UnknownVariant(UnknownVariant),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Forms(err) => write!(f, "form error: {}", err),
            AppError::UnknownVariant(err) => write!(f, "form error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Forms(err) => Some(err),
            AppError::UnknownVariant(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, payload) = match self {
            AppError::Forms(FeedbackServiceError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "errors": errors }),
            ),
            AppError::Forms(FeedbackServiceError::Record(err)) => {
                (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
            }
            AppError::Forms(FeedbackServiceError::SessionNotFound(id)) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "form session not found", "session_id": id.0 }),
            ),
            AppError::Forms(err @ FeedbackServiceError::SessionLimitReached { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": err.to_string() }),
            ),
            AppError::UnknownVariant(err) => {
                (StatusCode::NOT_FOUND, json!({ "error": err.to_string() }))
            }
            other @ (AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": other.to_string() }),
            ),
        };

        (status, Json(payload)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<FeedbackServiceError> for AppError {
    fn from(value: FeedbackServiceError) -> Self {
        Self::Forms(value)
    }
}

impl From<UnknownVariant> for AppError {
    fn from(value: UnknownVariant) -> Self {
        Self::UnknownVariant(value)
    }
}
