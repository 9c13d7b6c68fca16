//! # cite-report
//!
//! Presentation-side projections of a [`VerificationResult`]:
//!
//! - [`summary_view`]: counts plus one card per citation
//! - [`printable`]: a paginated plain-text report with a four-style
//!   bibliography appendix
//! - [`bibliography_export`]: a single style block for copy/export
//!
//! Everything here is a pure function of the result.

mod printable;
mod summary;
pub mod text;

pub use printable::{
    ENTRY_RATIONALE_CHARS, ENTRY_TEXT_CHARS, Page, PageLayout, PrintableDocument, printable,
};
pub use summary::{CARD_EXCERPT_CHARS, CitationCard, SummaryView, UNTITLED, summary_view};

use cite_core::{BibliographyStyle, VerificationResult};

/// Text of one bibliography style, or `None` when the result has no
/// bibliography or that style is blank.
#[must_use]
pub fn bibliography_export(result: &VerificationResult, style: BibliographyStyle) -> Option<String> {
    result
        .multi_style_bib
        .as_ref()
        .map(|bib| bib.get(style).trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cite_core::MultiStyleBibliography;
    use pretty_assertions::assert_eq;

    #[test]
    fn exports_one_style() {
        let result = VerificationResult::new(
            Vec::new(),
            Some(MultiStyleBibliography {
                apa: "APA".into(),
                mla: "MLA\n".into(),
                chicago: "Chicago".into(),
                ieee: " ".into(),
            }),
        );
        assert_eq!(
            bibliography_export(&result, BibliographyStyle::Mla).as_deref(),
            Some("MLA")
        );
        assert!(bibliography_export(&result, BibliographyStyle::Ieee).is_none());
    }

    #[test]
    fn no_bibliography_exports_nothing() {
        let result = VerificationResult::new(Vec::new(), None);
        assert!(bibliography_export(&result, BibliographyStyle::Apa).is_none());
    }
}
