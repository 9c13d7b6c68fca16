//! Evidence fusion: combine independent signals into one status label.
//!
//! Rules, applied in order (later rules override earlier ones):
//!
//! ```text
//! default                              → UNVERIFIED     0.50
//! exactly one of registry | grounding  → PARTIAL_MATCH  0.75
//! registry and grounding               → VERIFIED       0.99
//! fabrication markers in audit text    → HALLUCINATION  0.95
//! ```
//!
//! Absence of evidence never resolves to a positive claim, and fabrication
//! evidence wins over any number of matching signals.

use crate::enums::CitationStatus;

/// Confidence assigned when no signal fired.
pub const UNVERIFIED_CONFIDENCE: f64 = 0.5;
/// Confidence assigned when exactly one signal fired.
pub const PARTIAL_CONFIDENCE: f64 = 0.75;
/// Confidence assigned when both signals fired.
pub const VERIFIED_CONFIDENCE: f64 = 0.99;
/// Confidence assigned when fabrication markers were found.
pub const HALLUCINATION_CONFIDENCE: f64 = 0.95;

/// Phrases in the verification text that mark a source as fabricated.
pub const FABRICATION_MARKERS: &[&str] = &[
    "fabricated",
    "hallucination",
    "hallucinated",
    "does not exist",
    "non-existent",
    "nonexistent",
    "fictitious",
];

/// The three independent signals gathered for one citation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evidence {
    /// The identifier resolved in the metadata registry.
    pub registry_match: bool,
    /// The grounded verification pass returned at least one reference.
    pub grounding_match: bool,
    /// The verification text contains fabrication markers.
    pub fabrication_signal: bool,
}

impl Evidence {
    /// Provenance tag naming the signals that fired.
    #[must_use]
    pub const fn source_label(self) -> &'static str {
        match (self.registry_match, self.grounding_match) {
            (true, true) => "Crossref + Google Search",
            (true, false) => "Crossref",
            (false, true) => "Google Search",
            (false, false) => "None",
        }
    }
}

/// Status and confidence produced by [`fuse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fusion {
    pub status: CitationStatus,
    pub confidence: f64,
}

/// Fuse evidence into a status label. Pure function of its input.
#[must_use]
pub const fn fuse(evidence: Evidence) -> Fusion {
    if evidence.fabrication_signal {
        return Fusion {
            status: CitationStatus::Hallucination,
            confidence: HALLUCINATION_CONFIDENCE,
        };
    }
    match (evidence.registry_match, evidence.grounding_match) {
        (true, true) => Fusion {
            status: CitationStatus::Verified,
            confidence: VERIFIED_CONFIDENCE,
        },
        (true, false) | (false, true) => Fusion {
            status: CitationStatus::PartialMatch,
            confidence: PARTIAL_CONFIDENCE,
        },
        (false, false) => Fusion {
            status: CitationStatus::Unverified,
            confidence: UNVERIFIED_CONFIDENCE,
        },
    }
}

/// Whether `text` contains any fabrication marker (case-insensitive).
#[must_use]
pub fn has_fabrication_signal(text: &str) -> bool {
    let lowered = text.to_lowercase();
    FABRICATION_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
