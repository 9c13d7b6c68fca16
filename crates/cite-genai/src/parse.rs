//! Parsing of model output.
//!
//! Models asked for JSON still wrap it in Markdown fences now and then, and
//! sometimes return an object wrapping the array that was asked for. Both are
//! accepted here.

use std::str::FromStr;

use cite_core::{CandidateCitation, CitationStatus, MultiStyleBibliography, ReviewProposal};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GenAiError;

/// Remove an optional surrounding ```` ``` ```` / ```` ```json ```` fence.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) up to the first newline.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Deserialize JSON model output after stripping fences.
///
/// # Errors
///
/// Returns [`GenAiError::EmptyResponse`] for blank output and
/// [`GenAiError::Parse`] when the JSON does not match `T`.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GenAiError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(GenAiError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrWrapped<T> {
    List(Vec<T>),
    Wrapped {
        #[serde(alias = "citations", alias = "reviews", alias = "proposals", alias = "items")]
        items: Vec<T>,
    },
}

impl<T> ListOrWrapped<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::List(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Parse the extraction pass output into candidates.
///
/// Candidates with blank raw text are dropped.
///
/// # Errors
///
/// See [`parse_json`].
pub fn parse_candidates(text: &str) -> Result<Vec<CandidateCitation>, GenAiError> {
    let candidates = parse_json::<ListOrWrapped<CandidateCitation>>(text)?.into_vec();
    Ok(candidates
        .into_iter()
        .filter(|c| !c.raw_text.trim().is_empty())
        .collect())
}

#[derive(Deserialize)]
struct RawProposal {
    id: String,
    status: String,
    #[serde(default, alias = "reason", alias = "explanation")]
    reasoning: String,
}

/// Parse the skeptic-review output.
///
/// Statuses are matched leniently (`"Partial Match"`, `"hallucinated"`);
/// entries with an unrecognised status are skipped.
///
/// # Errors
///
/// See [`parse_json`].
pub fn parse_review(text: &str) -> Result<Vec<ReviewProposal>, GenAiError> {
    let raw = parse_json::<ListOrWrapped<RawProposal>>(text)?.into_vec();
    Ok(raw
        .into_iter()
        .filter_map(|p| match CitationStatus::from_str(&p.status) {
            Ok(status) => Some(ReviewProposal {
                id: p.id,
                status,
                reasoning: p.reasoning,
            }),
            Err(error) => {
                tracing::debug!(id = %p.id, %error, "skipping review entry");
                None
            }
        })
        .collect())
}

/// Parse the four-style bibliography output.
///
/// # Errors
///
/// See [`parse_json`].
pub fn parse_bibliography(text: &str) -> Result<MultiStyleBibliography, GenAiError> {
    parse_json(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("[1]", "[1]")]
    #[case("```json\n[1]\n```", "[1]")]
    #[case("```\n{\"a\": 1}\n```  ", "{\"a\": 1}")]
    #[case("  ```JSON\n[]\n```", "[]")]
    #[case("```json\n[2]", "[2]")]
    fn strips_fences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_code_fences(input), expected);
    }

    #[test]
    fn candidates_accept_bare_array_and_wrapper() {
        let bare = r#"[{"id": "c1", "rawText": "Smith 2020"}]"#;
        let wrapped = r#"{"citations": [{"id": "c1", "rawText": "Smith 2020"}]}"#;
        assert_eq!(parse_candidates(bare).unwrap(), parse_candidates(wrapped).unwrap());
    }

    #[rstest]
    #[case::numeric_id(r#"{"id": 1, "rawText": "Smith 2020"}"#, Some("1"), &[])]
    #[case::null_id(r#"{"id": null, "rawText": "Smith 2020"}"#, None, &[])]
    #[case::null_authors(r#"{"id": "c1", "rawText": "Smith 2020", "authors": null}"#, Some("c1"), &[])]
    #[case::string_authors(
        r#"{"id": "c1", "rawText": "Smith 2020", "authors": "J. Smith"}"#,
        Some("c1"),
        &["J. Smith"]
    )]
    #[case::array_authors(
        r#"{"id": "c1", "rawText": "Smith 2020", "authors": ["J. Smith", null, "A. Lee"]}"#,
        Some("c1"),
        &["J. Smith", "A. Lee"]
    )]
    #[case::null_optionals(
        r#"{"id": "c1", "rawText": "Smith 2020", "title": null, "doi": null, "journal": null, "year": null}"#,
        Some("c1"),
        &[]
    )]
    fn candidate_field_shapes_do_not_fail_the_batch(
        #[case] odd: &str,
        #[case] id: Option<&str>,
        #[case] authors: &[&str],
    ) {
        let text = format!(r#"[{odd}, {{"id": "c2", "rawText": "Lee 2019"}}]"#);
        let parsed = parse_candidates(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id.as_deref(), id);
        assert_eq!(parsed[0].authors, authors);
        assert_eq!(parsed[1].raw_text, "Lee 2019");
    }

    #[test]
    fn empty_extraction_is_not_an_error() {
        assert!(parse_candidates("```json\n[]\n```").unwrap().is_empty());
    }

    #[test]
    fn blank_candidates_are_dropped() {
        let parsed =
            parse_candidates(r#"[{"rawText": "  "}, {"rawText": "Lee 2019"}]"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].raw_text, "Lee 2019");
    }

    #[test]
    fn blank_output_is_empty_response() {
        assert!(matches!(
            parse_candidates("   "),
            Err(GenAiError::EmptyResponse)
        ));
    }

    #[test]
    fn prose_is_a_parse_error() {
        assert!(matches!(
            parse_candidates("I found two citations."),
            Err(GenAiError::Parse(_))
        ));
    }

    #[test]
    fn review_statuses_are_lenient_and_unknown_ones_skipped() {
        let text = r#"[
            {"id": "a", "status": "Partial Match", "reasoning": "authors differ"},
            {"id": "b", "status": "HALLUCINATION", "reason": "no such journal"},
            {"id": "c", "status": "probably fine"}
        ]"#;
        let proposals = parse_review(text).unwrap();
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0].status, CitationStatus::PartialMatch);
        assert_eq!(proposals[1].reasoning, "no such journal");
    }

    #[test]
    fn bibliography_requires_all_styles() {
        let full = r#"{"apa": "A", "mla": "M", "chicago": "C", "ieee": "I"}"#;
        assert!(parse_bibliography(full).unwrap().is_complete());
        assert!(parse_bibliography(r#"{"apa": "A"}"#).is_err());
    }
}
