//! # cite-audit
//!
//! The citation verification pipeline.
//!
//! One call to [`Auditor::verify`] runs, in order:
//!
//! 1. extraction of citation candidates (fatal on failure);
//! 2. per candidate, with bounded concurrency and input order preserved:
//!    DOI resolution, registry lookup, the verification pass, fusion;
//! 3. the skeptic review over the complete fused batch;
//! 4. bibliography rendering for the `VERIFIED` subset;
//! 5. summary projection.
//!
//! Collaborators are injected as trait objects so the pipeline holds no
//! global state and can be driven by fakes in tests.

mod error;

pub use error::AuditError;

use std::sync::Arc;

use cite_config::AuditConfig;
use cite_core::doi;
use cite_core::fusion::{self, Evidence};
use cite_core::ids::IdAllocator;
use cite_core::{
    Citation, CitationStatus, MultiStyleBibliography, VerificationEvidence, VerificationResult,
    apply_review,
};
use cite_genai::{AuditPrompt, CitationAssistant};
use cite_registry::MetadataLookup;
use futures::{StreamExt, stream};

/// Pipeline switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    /// Citations verified in parallel. Values below 1 are treated as 1.
    pub concurrency: usize,
    /// Run the skeptic review pass.
    pub review: bool,
    /// Allow web-search grounding on the verification pass.
    pub grounding: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self::from(&AuditConfig::default())
    }
}

impl From<&AuditConfig> for AuditOptions {
    fn from(config: &AuditConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            review: config.review,
            grounding: config.grounding,
        }
    }
}

/// Runs verification requests against injected collaborators.
pub struct Auditor {
    assistant: Arc<dyn CitationAssistant>,
    registry: Arc<dyn MetadataLookup>,
    options: AuditOptions,
}

impl Auditor {
    #[must_use]
    pub fn new(
        assistant: Arc<dyn CitationAssistant>,
        registry: Arc<dyn MetadataLookup>,
        options: AuditOptions,
    ) -> Self {
        Self {
            assistant,
            registry,
            options,
        }
    }

    /// Audit every citation in `text`.
    ///
    /// # Errors
    ///
    /// - [`AuditError::EmptyInput`] for blank text (no upstream call is made)
    /// - [`AuditError::Extraction`] when the extraction pass fails
    /// - [`AuditError::Core`] when no citation id can be generated
    pub async fn verify(&self, text: &str) -> Result<VerificationResult, AuditError> {
        if text.trim().is_empty() {
            return Err(AuditError::EmptyInput);
        }

        let candidates = self
            .assistant
            .extract(text)
            .await
            .map_err(AuditError::Extraction)?;
        tracing::info!(candidates = candidates.len(), "extracted citations");

        let mut ids = IdAllocator::new();
        let mut pending = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let id = ids.claim(candidate.id.as_deref())?;
            let identifier = doi::resolve_identifier(&candidate.raw_text, candidate.doi.as_deref());
            let metadata = candidate.metadata();
            pending.push((Citation::pending(id, candidate.raw_text, metadata), identifier));
        }

        let mut citations: Vec<Citation> = stream::iter(pending)
            .map(|(citation, identifier)| self.assess(citation, identifier))
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        if self.options.review {
            self.review(&mut citations).await;
        }

        let bibliography = self.bibliography(&citations).await;
        let result = VerificationResult::new(citations, bibliography);
        tracing::info!(
            total = result.summary.total,
            verified = result.summary.verified,
            hallucinated = result.summary.hallucinated,
            unverified = result.summary.unverified,
            "verification complete"
        );
        Ok(result)
    }

    /// Gather evidence for one citation and fuse it into a status.
    async fn assess(&self, mut citation: Citation, identifier: Option<String>) -> Citation {
        let record = match identifier.as_deref() {
            Some(id) => self.registry.find(id).await,
            None => None,
        };
        let registry_match = record.is_some();
        let landing_url = record.as_ref().and_then(|r| r.url.clone());
        match record {
            Some(record) => citation.metadata.overlay(record.into_metadata()),
            None => {
                if citation.metadata.doi.is_none() {
                    citation.metadata.doi.clone_from(&identifier);
                }
            }
        }

        let prompt = AuditPrompt {
            raw_text: citation.raw_text.clone(),
            metadata: citation.metadata.clone(),
            registry_match,
        };
        let (evidence, pass_failed) =
            match self.assistant.verify_one(&prompt, self.options.grounding).await {
                Ok(evidence) => (evidence, false),
                Err(error) => {
                    tracing::warn!(id = %citation.id, %error, "verification pass failed; continuing without it");
                    (VerificationEvidence::default(), true)
                }
            };

        let signals = Evidence {
            registry_match,
            grounding_match: evidence.has_grounding(),
            fabrication_signal: fusion::has_fabrication_signal(&evidence.text),
        };
        let fused = fusion::fuse(signals);
        tracing::debug!(
            id = %citation.id,
            registry = signals.registry_match,
            grounding = signals.grounding_match,
            fabrication = signals.fabrication_signal,
            status = %fused.status,
            "fused evidence"
        );

        citation.source_url = evidence
            .first_url()
            .map(str::to_string)
            .or(landing_url)
            .or_else(|| {
                citation
                    .metadata
                    .doi
                    .as_deref()
                    .filter(|_| registry_match)
                    .map(doi::resolver_url)
            });
        let explanation = explain(identifier.is_some(), registry_match, &evidence, pass_failed);
        citation.apply_fusion(signals, fused, explanation);
        citation
    }

    async fn review(&self, citations: &mut [Citation]) {
        if citations.is_empty() {
            return;
        }
        match self.assistant.review_batch(citations).await {
            Ok(proposals) => {
                let changed = apply_review(citations, &proposals);
                tracing::debug!(proposals = proposals.len(), changed, "skeptic review applied");
            }
            Err(error) => {
                tracing::warn!(%error, "skeptic review failed; keeping fused statuses");
            }
        }
    }

    async fn bibliography(&self, citations: &[Citation]) -> Option<MultiStyleBibliography> {
        let verified: Vec<Citation> = citations
            .iter()
            .filter(|c| c.status == CitationStatus::Verified)
            .cloned()
            .collect();
        if verified.is_empty() {
            return None;
        }
        match self.assistant.render_bibliography(&verified).await {
            Ok(bibliography) if bibliography.is_complete() => Some(bibliography),
            Ok(_) => {
                tracing::warn!("bibliography is missing a style; omitting it");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "bibliography rendering failed; omitting it");
                None
            }
        }
    }
}

fn explain(
    has_identifier: bool,
    registry_match: bool,
    evidence: &VerificationEvidence,
    pass_failed: bool,
) -> String {
    let registry = match (has_identifier, registry_match) {
        (_, true) => "DOI resolved in Crossref.",
        (true, false) => "DOI not found in Crossref.",
        (false, false) => "No DOI found in the citation.",
    };
    let audit = evidence.text.trim();
    if pass_failed {
        format!("{registry} Web verification was unavailable for this citation.")
    } else if audit.is_empty() {
        format!("{registry} Web verification returned no findings.")
    } else {
        format!("{registry} {audit}")
    }
}
