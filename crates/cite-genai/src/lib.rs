//! # cite-genai
//!
//! The generative-language collaborator behind citecheck.
//!
//! [`CitationAssistant`] names the four calls the pipeline makes:
//! extraction, per-citation verification (optionally web-grounded), the
//! skeptic review, and bibliography rendering. [`GeminiClient`] implements it
//! over the Gemini `generateContent` endpoint; tests substitute fakes.

mod error;
mod gemini;
pub mod parse;
pub mod prompts;

pub use error::GenAiError;
pub use gemini::GeminiClient;
pub use prompts::AuditPrompt;

use async_trait::async_trait;
use cite_core::{
    CandidateCitation, Citation, MultiStyleBibliography, ReviewProposal, VerificationEvidence,
};

/// Opaque model-backed operations consumed by the audit pipeline.
#[async_trait]
pub trait CitationAssistant: Send + Sync {
    /// Extract citation-like fragments from manuscript text, in order.
    async fn extract(&self, text: &str) -> Result<Vec<CandidateCitation>, GenAiError>;

    /// Audit one citation. With `grounding`, the call may search the web and
    /// report the pages it relied on.
    async fn verify_one(
        &self,
        prompt: &AuditPrompt,
        grounding: bool,
    ) -> Result<VerificationEvidence, GenAiError>;

    /// Second-opinion pass over the whole fused batch.
    async fn review_batch(&self, citations: &[Citation]) -> Result<Vec<ReviewProposal>, GenAiError>;

    /// Render the given (verified) citations in APA, MLA, Chicago and IEEE.
    async fn render_bibliography(
        &self,
        citations: &[Citation],
    ) -> Result<MultiStyleBibliography, GenAiError>;
}
