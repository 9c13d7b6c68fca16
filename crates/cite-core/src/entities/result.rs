use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::citation::Citation;
use crate::enums::{BibliographyStyle, CitationStatus};

/// Counts over the final statuses of a batch.
///
/// Always derived with [`Summary::from_citations`]; never edited by hand.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub verified: usize,
    pub hallucinated: usize,
    /// `UNVERIFIED` and `PARTIAL_MATCH` combined.
    pub unverified: usize,
}

impl Summary {
    #[must_use]
    pub fn from_citations(citations: &[Citation]) -> Self {
        citations.iter().fold(
            Self {
                total: citations.len(),
                ..Self::default()
            },
            |mut acc, citation| {
                match citation.status {
                    CitationStatus::Verified => acc.verified += 1,
                    CitationStatus::Hallucination => acc.hallucinated += 1,
                    status if status.is_unverified_or_partial() => acc.unverified += 1,
                    _ => {}
                }
                acc
            },
        )
    }
}

/// The same verified-source set rendered in four citation styles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MultiStyleBibliography {
    pub apa: String,
    pub mla: String,
    pub chicago: String,
    pub ieee: String,
}

impl MultiStyleBibliography {
    #[must_use]
    pub fn get(&self, style: BibliographyStyle) -> &str {
        match style {
            BibliographyStyle::Apa => &self.apa,
            BibliographyStyle::Mla => &self.mla,
            BibliographyStyle::Chicago => &self.chicago,
            BibliographyStyle::Ieee => &self.ieee,
        }
    }

    /// True when every style block has content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        BibliographyStyle::ALL
            .iter()
            .all(|style| !self.get(*style).trim().is_empty())
    }
}

/// Outcome of one verification request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub citations: Vec<Citation>,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_style_bib: Option<MultiStyleBibliography>,
}

impl VerificationResult {
    /// Assemble a result, deriving the summary from `citations`.
    #[must_use]
    pub fn new(citations: Vec<Citation>, multi_style_bib: Option<MultiStyleBibliography>) -> Self {
        let summary = Summary::from_citations(&citations);
        Self {
            citations,
            summary,
            multi_style_bib,
        }
    }

    /// Whether the stored summary matches a fresh projection of the citations.
    ///
    /// Results read back from disk or the wire are checked with this before
    /// being rendered.
    #[must_use]
    pub fn summary_is_consistent(&self) -> bool {
        self.summary == Summary::from_citations(&self.citations)
    }
}
