use cite_core::{Citation, CitationStatus, VerificationResult};
use serde::Serialize;

use crate::text::truncate;

/// Characters of raw citation text shown on a card.
pub const CARD_EXCERPT_CHARS: usize = 150;

/// Title shown when neither the registry nor the extractor supplied one.
pub const UNTITLED: &str = "Untitled reference";

/// One citation as a results card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CitationCard {
    pub id: String,
    pub title: String,
    pub status: CitationStatus,
    pub status_label: &'static str,
    /// Confidence as a whole percentage.
    pub confidence_pct: u8,
    pub source: String,
    pub url: Option<String>,
    pub excerpt: String,
}

/// Counts plus one card per citation, in result order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryView {
    pub total: usize,
    pub verified: usize,
    pub hallucinated: usize,
    pub unverified: usize,
    pub cards: Vec<CitationCard>,
}

/// Project a result into the summary view.
#[must_use]
pub fn summary_view(result: &VerificationResult) -> SummaryView {
    SummaryView {
        total: result.summary.total,
        verified: result.summary.verified,
        hallucinated: result.summary.hallucinated,
        unverified: result.summary.unverified,
        cards: result.citations.iter().map(card).collect(),
    }
}

fn card(citation: &Citation) -> CitationCard {
    CitationCard {
        id: citation.id.clone(),
        title: title_of(citation).to_string(),
        status: citation.status,
        status_label: citation.status.label(),
        confidence_pct: percent(citation.confidence),
        source: citation.verification_source.clone(),
        url: citation.source_url.clone(),
        excerpt: truncate(&citation.raw_text, CARD_EXCERPT_CHARS),
    }
}

pub(crate) fn title_of(citation: &Citation) -> &str {
    citation
        .metadata
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn percent(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}
