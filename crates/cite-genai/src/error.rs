/// Errors from the generative-language collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned no text")]
    EmptyResponse,

    #[error("Failed to parse model output: {0}")]
    Parse(String),

    #[error("Gemini API key is not configured")]
    MissingApiKey,
}

impl From<serde_json::Error> for GenAiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
