//! DOI identifier extraction and normalization.
//!
//! Extraction is a pure scan of raw citation text; no lookups happen here.

use std::sync::LazyLock;

use regex::Regex;

/// Standard DOI grammar: `10.` + registrant code (4-9 digits, optional
/// sub-segments), `/`, then a suffix that stops at whitespace, quotes, `&`
/// or angle brackets. The trailing `\b` drops sentence punctuation such as
/// `.` or `]` that follows an inline DOI.
static DOI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b10\.\d{4,9}(?:\.\d+)*/[^\s"&'<>]+\b"#).expect("DOI pattern is valid")
});

/// Resolver prefixes stripped before a DOI is sent to the registry.
static RESOLVER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:dx\.)?doi\.org/").expect("resolver pattern is valid")
});

static DOI_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^doi:\s*").expect("label pattern is valid"));

/// Return the identifier for a citation fragment.
///
/// A non-blank `known` identifier (supplied by the extractor) always wins.
/// Otherwise the first DOI-shaped substring of `raw_text` is returned. When a
/// fragment contains several DOIs, the first one is taken.
#[must_use]
pub fn resolve_identifier(raw_text: &str, known: Option<&str>) -> Option<String> {
    if let Some(known) = known.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(known.to_string());
    }
    find_doi(raw_text).map(str::to_string)
}

/// First DOI-shaped substring of `text`, if any.
#[must_use]
pub fn find_doi(text: &str) -> Option<&str> {
    DOI_PATTERN.find(text).map(|m| m.as_str())
}

/// Strip resolver URL prefixes (`https://doi.org/`, `http://dx.doi.org/`) and
/// a leading `doi:` label, leaving the bare `10.xxxx/...` identifier.
#[must_use]
pub fn normalize(identifier: &str) -> String {
    let trimmed = identifier.trim();
    let without_resolver = RESOLVER_PREFIX.replace(trimmed, "");
    DOI_LABEL.replace(&without_resolver, "").trim().to_string()
}

/// Canonical resolver URL for a DOI.
#[must_use]
pub fn resolver_url(identifier: &str) -> String {
    format!("https://doi.org/{}", normalize(identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("see 10.1234/abcd.5 for details", "10.1234/abcd.5")]
    #[case("10.1234/abcd.5", "10.1234/abcd.5")]
    #[case("Smith (2020) found X [doi: 10.1000/xyz123]", "10.1000/xyz123")]
    #[case("as shown in 10.1234/abcd.5.", "10.1234/abcd.5")]
    #[case("https://doi.org/10.1038/nphys1170", "10.1038/nphys1170")]
    #[case("ref 10.1000.10/ab(cd)12", "10.1000.10/ab(cd)12")]
    fn finds_embedded_doi(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(find_doi(text), Some(expected));
    }

    #[rstest]
    #[case("Smith (2020) found X")]
    #[case("version 10.12/abc is too short")]
    #[case("")]
    fn no_doi_returns_none(#[case] text: &str) {
        assert_eq!(find_doi(text), None);
    }

    #[test]
    fn first_match_wins() {
        let text = "10.1111/first and 10.2222/second";
        assert_eq!(find_doi(text), Some("10.1111/first"));
    }

    #[test]
    fn known_identifier_takes_precedence() {
        let resolved = resolve_identifier("text 10.1234/abcd.5", Some("10.9999/known"));
        assert_eq!(resolved.as_deref(), Some("10.9999/known"));
    }

    #[test]
    fn blank_known_identifier_falls_back_to_scan() {
        let resolved = resolve_identifier("text 10.1234/abcd.5", Some("   "));
        assert_eq!(resolved.as_deref(), Some("10.1234/abcd.5"));
    }

    #[rstest]
    #[case("https://doi.org/10.1000/xyz", "10.1000/xyz")]
    #[case("http://dx.doi.org/10.1000/xyz", "10.1000/xyz")]
    #[case("HTTPS://DOI.ORG/10.1000/xyz", "10.1000/xyz")]
    #[case("doi.org/10.1000/xyz", "10.1000/xyz")]
    #[case("doi: 10.1000/xyz", "10.1000/xyz")]
    #[case(" 10.1000/xyz ", "10.1000/xyz")]
    fn normalize_strips_prefixes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn resolver_url_uses_bare_doi() {
        assert_eq!(
            resolver_url("https://dx.doi.org/10.1000/xyz"),
            "https://doi.org/10.1000/xyz"
        );
    }
}
