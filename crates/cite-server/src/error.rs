//! HTTP error mapping.
//!
//! Client mistakes get a 400 with a specific message. Everything else is a
//! 500 with one generic message; the cause is logged, never returned.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cite_audit::AuditError;
use serde_json::json;

/// Message returned for every server-side failure.
pub const GENERIC_FAILURE: &str = "Verification failed";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected request body");
        Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<AuditError> for ApiError {
    fn from(error: AuditError) -> Self {
        match error {
            AuditError::EmptyInput => Self::BadRequest(String::from("Text must not be empty")),
            other => {
                tracing::error!(error = %other, "verification pipeline failed");
                Self::Internal
            }
        }
    }
}
