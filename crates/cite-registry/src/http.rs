//! Status classification for registry responses.
//!
//! A 404 is an answer ("no such DOI"), not a failure, so it maps to `None`.
//! Rate limiting and other non-success codes become [`RegistryError`]s.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::RegistryError;

/// Longest error body kept in [`RegistryError::Api`].
const MAX_ERROR_BODY: usize = 200;

/// Classify a registry response.
///
/// - **2xx** → `Ok(Some(resp))`
/// - **404** → `Ok(None)`
/// - **429** → [`RegistryError::RateLimited`], honoring `Retry-After`
///   (60 s when absent or unparseable)
/// - anything else → [`RegistryError::Api`] with a clipped body
pub async fn classify(
    resp: reqwest::Response,
) -> Result<Option<reqwest::Response>, RegistryError> {
    match resp.status() {
        status if status.is_success() => Ok(Some(resp)),
        StatusCode::NOT_FOUND => Ok(None),
        StatusCode::TOO_MANY_REQUESTS => Err(RegistryError::RateLimited {
            retry_after_secs: retry_after(resp.headers()),
        }),
        status => {
            let mut message = resp.text().await.unwrap_or_default();
            if let Some((cut, _)) = message.char_indices().nth(MAX_ERROR_BODY) {
                message.truncate(cut);
            }
            Err(RegistryError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn retry_after(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}
