use std::any::Any;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const MALFORMED_INPUT_MESSAGE: &str = "Invalid JSON in request body.";
pub const INSUFFICIENT_PROFILE_MESSAGE: &str = "Please provide more information. \
    Fill out more form fields or speak longer during the voice conversation.";
pub const UPSTREAM_MODEL_MESSAGE: &str = "An AI processing error occurred. Please try again.";
pub const RESPONSE_PARSE_MESSAGE: &str = "Failed to parse AI response. Please try again.";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Sent verbatim when even the error body cannot be produced.
const FALLBACK_ERROR_BODY: &str = r#"{"success":false,"error":"An unexpected error occurred"}"#;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Request body is not valid JSON")]
    MalformedInput,

    #[error("Profile text is missing or shorter than the minimum length")]
    InsufficientProfile,

    #[error("Upstream model error: {0}")]
    UpstreamModel(String),

    #[error("Model reply could not be parsed as a simulation result")]
    ResponseParse,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedInput | AppError::InsufficientProfile => StatusCode::BAD_REQUEST,
            AppError::UpstreamModel(_) | AppError::ResponseParse | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to the caller. Upstream and internal details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MalformedInput => MALFORMED_INPUT_MESSAGE,
            AppError::InsufficientProfile => INSUFFICIENT_PROFILE_MESSAGE,
            AppError::UpstreamModel(_) => UPSTREAM_MODEL_MESSAGE,
            AppError::ResponseParse => RESPONSE_PARSE_MESSAGE,
            AppError::Internal(_) => INTERNAL_MESSAGE,
        }
    }
}

/// Wire shape of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub error: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MalformedInput | AppError::InsufficientProfile => {
                tracing::info!("Rejected request: {self}");
            }
            AppError::UpstreamModel(msg) => tracing::error!("Upstream model error: {msg}"),
            AppError::ResponseParse => tracing::error!("Model reply could not be parsed"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        error_response(self.status(), self.public_message())
    }
}

/// Builds a `{success: false, error}` JSON response, falling back to a fixed body
/// if serialization fails.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::to_string(&ErrorBody {
        success: false,
        error: message,
    })
    .unwrap_or_else(|e| {
        tracing::error!("Failed to serialize error body: {e}");
        FALLBACK_ERROR_BODY.to_string()
    });

    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// Converts a handler panic into the standard error shape.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Handler panicked: {detail}");

    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
}
