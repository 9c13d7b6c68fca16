//! Status and style enums for citecheck.
//!
//! `CitationStatus` serializes in `SCREAMING_SNAKE_CASE` to match the
//! `/verify` wire contract. Both enums parse leniently from strings so that
//! generative-model output (`"partial match"`, `"Verified"`) can be mapped.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// CitationStatus
// ---------------------------------------------------------------------------

/// Verification status of one audited citation.
///
/// ```text
/// pending → (fusion) → unverified | partial_match | verified | hallucination
///                    → (skeptic review) → any other final status
/// ```
///
/// `Pending` exists only between extraction and fusion and never appears in
/// a finished `VerificationResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CitationStatus {
    Verified,
    PartialMatch,
    Unverified,
    Hallucination,
    Pending,
}

impl CitationStatus {
    /// Statuses that may appear in a finished result.
    pub const FINAL: [Self; 4] = [
        Self::Verified,
        Self::PartialMatch,
        Self::Unverified,
        Self::Hallucination,
    ];

    /// Return the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::PartialMatch => "PARTIAL_MATCH",
            Self::Unverified => "UNVERIFIED",
            Self::Hallucination => "HALLUCINATION",
            Self::Pending => "PENDING",
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::PartialMatch => "Partial match",
            Self::Unverified => "Unverified",
            Self::Hallucination => "Hallucination",
            Self::Pending => "Pending",
        }
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether this status counts toward the summary's `unverified` bucket.
    #[must_use]
    pub const fn is_unverified_or_partial(self) -> bool {
        matches!(self, Self::Unverified | Self::PartialMatch)
    }
}

impl fmt::Display for CitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_uppercase() })
            .collect();

        match normalized.as_str() {
            "VERIFIED" => Ok(Self::Verified),
            "PARTIAL_MATCH" | "PARTIAL" => Ok(Self::PartialMatch),
            "UNVERIFIED" => Ok(Self::Unverified),
            "HALLUCINATION" | "HALLUCINATED" => Ok(Self::Hallucination),
            "PENDING" => Ok(Self::Pending),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// BibliographyStyle
// ---------------------------------------------------------------------------

/// One of the four citation styles rendered for verified sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BibliographyStyle {
    Apa,
    Mla,
    Chicago,
    Ieee,
}

impl BibliographyStyle {
    /// All styles in presentation order.
    pub const ALL: [Self; 4] = [Self::Apa, Self::Mla, Self::Chicago, Self::Ieee];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apa => "apa",
            Self::Mla => "mla",
            Self::Chicago => "chicago",
            Self::Ieee => "ieee",
        }
    }

    /// Display heading, e.g. `APA` or `Chicago`.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Apa => "APA",
            Self::Mla => "MLA",
            Self::Chicago => "Chicago",
            Self::Ieee => "IEEE",
        }
    }
}

impl fmt::Display for BibliographyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BibliographyStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apa" => Ok(Self::Apa),
            "mla" => Ok(Self::Mla),
            "chicago" => Ok(Self::Chicago),
            "ieee" => Ok(Self::Ieee),
            _ => Err(CoreError::UnknownStyle(s.to_string())),
        }
    }
}
