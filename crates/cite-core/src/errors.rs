//! Cross-cutting error types for citecheck.
//!
//! Domain-specific errors (`RegistryError`, `GenAiError`, `AuditError`) are
//! defined in their respective crates.

use thiserror::Error;

/// Errors that can be raised by core citation logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status string did not name any known `CitationStatus`.
    #[error("Unknown citation status: {0}")]
    UnknownStatus(String),

    /// A bibliography style string did not name any supported style.
    #[error("Unknown bibliography style: {0}")]
    UnknownStyle(String),

    /// The OS random source failed while generating a citation ID.
    #[error("Failed to generate citation id: {0}")]
    IdGeneration(String),
}
