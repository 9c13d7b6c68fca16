use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CitationStatus;
use crate::fusion::{Evidence, Fusion};

/// Separator placed between the fused rationale and skeptic-review notes.
pub const REVIEW_SEPARATOR: &str = "\n\n[Skeptic review] ";

/// Bibliographic fields known about a citation.
///
/// Filled first from the extractor's guess, then overlaid with registry data
/// when the identifier resolves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CitationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

impl CitationMetadata {
    /// Overlay `other` on top of `self`: every field present in `other` wins.
    ///
    /// Registry records are the independently verified signal, so they are
    /// passed as `other`.
    pub fn overlay(&mut self, other: Self) {
        if other.title.is_some() {
            self.title = other.title;
        }
        if !other.authors.is_empty() {
            self.authors = other.authors;
        }
        if other.year.is_some() {
            self.year = other.year;
        }
        if other.doi.is_some() {
            self.doi = other.doi;
        }
        if other.journal.is_some() {
            self.journal = other.journal;
        }
        if other.volume.is_some() {
            self.volume = other.volume;
        }
        if other.issue.is_some() {
            self.issue = other.issue;
        }
    }
}

/// One audited reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: String,
    pub raw_text: String,
    #[serde(flatten)]
    pub metadata: CitationMetadata,
    pub status: CitationStatus,
    pub confidence: f64,
    pub verification_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

impl Citation {
    /// A freshly extracted citation awaiting fusion.
    #[must_use]
    pub fn pending(id: String, raw_text: String, metadata: CitationMetadata) -> Self {
        Self {
            id,
            raw_text,
            metadata,
            status: CitationStatus::Pending,
            confidence: 0.0,
            verification_source: String::from("None"),
            source_url: None,
            explanation: String::new(),
        }
    }

    /// Record the outcome of evidence fusion.
    pub fn apply_fusion(&mut self, evidence: Evidence, fusion: Fusion, explanation: String) {
        self.status = fusion.status;
        self.confidence = fusion.confidence;
        self.verification_source = evidence.source_label().to_string();
        self.explanation = explanation;
    }

    /// Change status from a review pass, appending `reasoning` to the
    /// explanation rather than replacing it.
    pub fn revise(&mut self, status: CitationStatus, reasoning: &str) {
        self.status = status;
        self.explanation.push_str(REVIEW_SEPARATOR);
        self.explanation.push_str(reasoning.trim());
    }
}
