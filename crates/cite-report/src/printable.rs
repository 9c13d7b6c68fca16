//! Paginated plain-text report.
//!
//! Layout runs in two passes: content is wrapped and poured into pages of
//! `lines_per_page - 2` body lines, then every page gets a `Page n of m`
//! footer once the page count is known.

use cite_config::ReportConfig;
use cite_core::{BibliographyStyle, Citation, VerificationResult};

use crate::summary::{percent, title_of};
use crate::text::{truncate, wrap};

/// Characters of raw citation text shown per entry.
pub const ENTRY_TEXT_CHARS: usize = 200;
/// Characters of rationale shown per entry.
pub const ENTRY_RATIONALE_CHARS: usize = 300;

const REPORT_TITLE: &str = "CITATION VERIFICATION REPORT";
const INDENT: &str = "   ";
/// Reserved at the bottom of every page: a blank line and the footer.
const FOOTER_LINES: usize = 2;

/// Page geometry in characters and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: usize,
    pub lines_per_page: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for PageLayout {
    fn from(config: &ReportConfig) -> Self {
        Self {
            width: config.page_width,
            lines_per_page: config.lines_per_page,
        }
    }
}

impl PageLayout {
    fn body_lines(self) -> usize {
        self.lines_per_page.saturating_sub(FOOTER_LINES).max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableDocument {
    pub layout: PageLayout,
    pub pages: Vec<Page>,
}

impl PrintableDocument {
    /// Plain text with pages separated by form feeds. Each page is padded so
    /// the footer sits on its last line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let width = self.layout.width;
        self.pages
            .iter()
            .map(|page| {
                let mut lines = page.lines.clone();
                lines.resize(self.layout.lines_per_page.saturating_sub(1), String::new());
                lines.push(format!("{:>width$}", page.footer));
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\u{c}\n")
    }
}

/// Lay out `result` as a printable document.
#[must_use]
pub fn printable(result: &VerificationResult, layout: &PageLayout) -> PrintableDocument {
    let mut pages = Paginator::new(*layout);

    // Executive summary
    pages.push(REPORT_TITLE);
    pages.push(&"=".repeat(layout.width.min(REPORT_TITLE.len())));
    pages.blank();
    pages.push("Executive summary");
    let summary = &result.summary;
    pages.push(&format!("{INDENT}Total citations:       {}", summary.total));
    pages.push(&format!("{INDENT}Verified:              {}", summary.verified));
    pages.push(&format!("{INDENT}Unverified or partial: {}", summary.unverified));
    pages.push(&format!("{INDENT}Hallucinated:          {}", summary.hallucinated));
    pages.blank();

    // Citation details
    pages.push("Citation details");
    pages.push(&"-".repeat(layout.width.min(16)));
    if result.citations.is_empty() {
        pages.push(&format!("{INDENT}No citations were found in the submitted text."));
    }
    for (index, citation) in result.citations.iter().enumerate() {
        let entry = entry_lines(index + 1, citation, layout.width);
        pages.keep_together(entry);
        pages.blank();
    }

    // Bibliography, one style per page
    if let Some(bibliography) = &result.multi_style_bib {
        for style in BibliographyStyle::ALL {
            pages.new_page();
            let heading = format!("Bibliography ({})", style.heading());
            pages.push(&heading);
            pages.push(&"-".repeat(layout.width.min(heading.len())));
            for line in wrap(bibliography.get(style).trim(), layout.width) {
                pages.push(&line);
            }
        }
    }

    pages.finish()
}

fn entry_lines(number: usize, citation: &Citation, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(INDENT.len()).max(1);
    let mut lines = wrap(&format!("{number}. {}", title_of(citation)), width);

    lines.push(format!(
        "{INDENT}Status: {} ({}% confidence)",
        citation.status.label(),
        percent(citation.confidence)
    ));
    lines.extend(indented(
        &format!("Source: {}", citation.verification_source),
        inner,
    ));
    if let Some(url) = &citation.source_url {
        lines.extend(indented(&format!("Link: {url}"), inner));
    }
    lines.extend(indented(
        &format!("Text: {}", truncate(&citation.raw_text, ENTRY_TEXT_CHARS)),
        inner,
    ));
    if !citation.explanation.trim().is_empty() {
        lines.extend(indented(
            &format!(
                "Rationale: {}",
                truncate(&citation.explanation, ENTRY_RATIONALE_CHARS)
            ),
            inner,
        ));
    }
    lines
}

fn indented(text: &str, width: usize) -> impl Iterator<Item = String> {
    wrap(text, width).into_iter().map(|l| format!("{INDENT}{l}"))
}

/// Accumulates body lines into fixed-height pages.
struct Paginator {
    layout: PageLayout,
    done: Vec<Vec<String>>,
    current: Vec<String>,
}

impl Paginator {
    const fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            done: Vec::new(),
            current: Vec::new(),
        }
    }

    fn remaining(&self) -> usize {
        self.layout.body_lines().saturating_sub(self.current.len())
    }

    fn push(&mut self, line: &str) {
        if self.remaining() == 0 {
            self.new_page();
        }
        self.current.push(line.to_string());
    }

    /// A blank separator; dropped at the top of a page.
    fn blank(&mut self) {
        if !self.current.is_empty() && self.remaining() > 0 {
            self.current.push(String::new());
        }
    }

    /// Push a block, starting a fresh page first when it would otherwise be
    /// split but fits on a page of its own.
    fn keep_together(&mut self, block: Vec<String>) {
        if block.len() > self.remaining() && block.len() <= self.layout.body_lines() {
            self.new_page();
        }
        for line in block {
            self.push(&line);
        }
    }

    fn new_page(&mut self) {
        if !self.current.is_empty() {
            self.done.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> PrintableDocument {
        self.new_page();
        let total = self.done.len();
        let pages = self
            .done
            .into_iter()
            .enumerate()
            .map(|(i, mut lines)| {
                while lines.last().is_some_and(String::is_empty) {
                    lines.pop();
                }
                Page {
                    lines,
                    footer: format!("Page {} of {total}", i + 1),
                }
            })
            .collect();
        PrintableDocument {
            layout: self.layout,
            pages,
        }
    }
}
