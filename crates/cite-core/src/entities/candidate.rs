use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::citation::CitationMetadata;
use super::de::{lenient_authors, lenient_id, lenient_year};

/// A citation-like fragment as returned by the extraction pass.
///
/// Every field except `raw_text` is best-effort: the extractor may omit the
/// id, guess the authors, or miss the DOI entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCitation {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(alias = "raw_text", alias = "text")]
    pub raw_text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_authors")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    #[schemars(with = "Option<i32>")]
    pub year: Option<i32>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
}

impl CandidateCitation {
    /// Metadata guessed by the extractor, before any registry lookup.
    #[must_use]
    pub fn metadata(&self) -> CitationMetadata {
        CitationMetadata {
            title: self.title.clone().filter(|t| !t.trim().is_empty()),
            authors: self.authors.clone(),
            year: self.year,
            doi: self.doi.clone().filter(|d| !d.trim().is_empty()),
            journal: self.journal.clone(),
            volume: None,
            issue: None,
        }
    }
}
