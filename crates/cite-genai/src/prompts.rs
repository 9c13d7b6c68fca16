//! Prompt construction for the four collaborator calls.

use std::fmt::Write as _;

use cite_core::fusion::FABRICATION_MARKERS;
use cite_core::{Citation, CitationMetadata};
use serde::Serialize;

const EXTRACTION_INSTRUCTIONS: &str = "You are a meticulous research librarian. \
Extract every citation or reference-like fragment from the manuscript below. \
Include in-text citations and reference-list entries. Do not invent anything.\n\
Respond with a JSON array only. Each element has the keys: \
\"id\" (short unique string), \"rawText\" (the fragment verbatim), \"title\", \
\"authors\" (array of strings), \"year\" (number), \"doi\", \"journal\". \
Omit keys you cannot determine. If there are no citations, return [].";

const VERIFICATION_INSTRUCTIONS: &str = "You are auditing a manuscript citation \
for existence and accuracy. Use web search to find the cited work. Report \
whether it exists, whether the authors, year, title and venue match, and \
cite the pages you relied on. If the work cannot be found and appears \
invented, say explicitly that it is fabricated or does not exist.";

const REVIEW_INSTRUCTIONS: &str = "You are a skeptical second reviewer. Each \
citation below already carries a status and a rationale from an automated \
audit. Challenge any status the evidence does not support. Statuses are \
VERIFIED, PARTIAL_MATCH, UNVERIFIED and HALLUCINATION.\n\
Respond with a JSON array only, one element per citation whose status you \
would change: {\"id\", \"status\", \"reasoning\"}. Return [] if you agree \
with every status.";

const BIBLIOGRAPHY_INSTRUCTIONS: &str = "Format the verified sources below as \
a bibliography in four styles. Respond with a JSON object only, with the \
keys \"apa\", \"mla\", \"chicago\" and \"ieee\". Each value is the complete \
reference list in that style as plain text, one entry per line, sorted as \
the style requires.";

/// Everything the verification pass needs to know about one citation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditPrompt {
    /// Fragment as it appeared in the manuscript.
    pub raw_text: String,
    /// Best-known metadata (registry fields overlaid on the extractor's).
    pub metadata: CitationMetadata,
    /// Whether the identifier resolved in the metadata registry.
    pub registry_match: bool,
}

impl AuditPrompt {
    /// Render the full verification prompt.
    #[must_use]
    pub fn render(&self) -> String {
        let mut prompt = String::from(VERIFICATION_INSTRUCTIONS);
        prompt.push(' ');
        prompt.push_str(&fabrication_rule());
        prompt.push_str("\n\nCITATION:\n");
        prompt.push_str(self.raw_text.trim());
        prompt.push('\n');

        let meta = &self.metadata;
        let mut known = String::new();
        if let Some(title) = &meta.title {
            let _ = writeln!(known, "- Title: {title}");
        }
        if !meta.authors.is_empty() {
            let _ = writeln!(known, "- Authors: {}", meta.authors.join(", "));
        }
        if let Some(year) = meta.year {
            let _ = writeln!(known, "- Year: {year}");
        }
        if let Some(journal) = &meta.journal {
            let _ = writeln!(known, "- Venue: {journal}");
        }
        if let Some(doi) = &meta.doi {
            let _ = writeln!(known, "- DOI: {doi}");
        }
        if !known.is_empty() {
            prompt.push_str("\nKNOWN METADATA:\n");
            prompt.push_str(&known);
        }

        prompt.push_str(if self.registry_match {
            "\nThe DOI resolved in Crossref; check that the citation matches that record.\n"
        } else {
            "\nNo Crossref record was found for this citation.\n"
        });
        prompt
    }
}

/// Prompt for the extraction pass.
#[must_use]
pub fn extraction(text: &str) -> String {
    format!("{EXTRACTION_INSTRUCTIONS}\n\nMANUSCRIPT:\n{text}")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewItem<'a> {
    id: &'a str,
    raw_text: &'a str,
    status: &'a str,
    confidence: f64,
    rationale: &'a str,
}

/// Prompt for the skeptic review pass over a whole batch.
#[must_use]
pub fn review(citations: &[Citation]) -> String {
    let items: Vec<ReviewItem<'_>> = citations
        .iter()
        .map(|c| ReviewItem {
            id: &c.id,
            raw_text: &c.raw_text,
            status: c.status.as_str(),
            confidence: c.confidence,
            rationale: &c.explanation,
        })
        .collect();
    format!(
        "{REVIEW_INSTRUCTIONS}\n\nCITATIONS:\n{}",
        serde_json::to_string_pretty(&items).unwrap_or_default()
    )
}

/// Prompt for bibliography rendering of the verified set.
#[must_use]
pub fn bibliography(citations: &[Citation]) -> String {
    let sources: Vec<&CitationMetadata> = citations.iter().map(|c| &c.metadata).collect();
    format!(
        "{BIBLIOGRAPHY_INSTRUCTIONS}\n\nSOURCES:\n{}",
        serde_json::to_string_pretty(&sources).unwrap_or_default()
    )
}

/// The audit text is scanned for these phrases, so the model must reserve
/// them for a positive finding of fabrication.
fn fabrication_rule() -> String {
    let phrases = FABRICATION_MARKERS
        .iter()
        .map(|marker| format!("\"{marker}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Use the phrases {phrases} only to state that this citation is invented. \
Never use them in negated form (write \"the work was found\", not \"the work is \
not fabricated\") and never to describe anything other than this citation."
    )
}
