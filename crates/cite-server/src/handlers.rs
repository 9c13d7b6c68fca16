use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use cite_core::VerificationResult;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// `POST /verify`
pub async fn verify(
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerificationResult>, ApiError> {
    let Json(request) = body?;
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest(String::from("Text must not be empty")));
    }
    tracing::info!(chars = request.text.chars().count(), "verify request");

    match tokio::time::timeout(state.request_timeout, state.auditor.verify(&request.text)).await {
        Ok(result) => Ok(Json(result?)),
        Err(_) => {
            tracing::error!(
                timeout_secs = state.request_timeout.as_secs(),
                "verification timed out"
            );
            Err(ApiError::Internal)
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
