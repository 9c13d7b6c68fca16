use cite_core::CoreError;
use cite_genai::GenAiError;

/// Errors that abort a whole verification run.
///
/// Per-citation failures (registry outages, a failed verification call) are
/// not errors at this level: they degrade that citation's evidence.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("citation extraction failed: {0}")]
    Extraction(#[source] GenAiError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
