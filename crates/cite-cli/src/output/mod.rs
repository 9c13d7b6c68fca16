use cite_core::VerificationResult;
use cite_report::{SummaryView, summary_view};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableOptions, render_table};

/// Values that have a table rendering in addition to JSON.
pub trait Tabular {
    fn to_table(&self, options: TableOptions) -> String;
}

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            Ok(value.to_table(TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            }))
        }
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl Tabular for SummaryView {
    fn to_table(&self, options: TableOptions) -> String {
        let counts = format!(
            "{} citations: {} verified, {} unverified or partial, {} hallucinated",
            self.total, self.verified, self.unverified, self.hallucinated
        );
        if self.cards.is_empty() {
            return counts;
        }
        let rows: Vec<Vec<String>> = self
            .cards
            .iter()
            .map(|card| {
                vec![
                    card.id.clone(),
                    card.status.as_str().to_string(),
                    format!("{}%", card.confidence_pct),
                    card.source.clone(),
                    card.title.clone(),
                ]
            })
            .collect();
        let table = render_table(&["id", "status", "conf", "source", "title"], &rows, options);
        format!("{counts}\n\n{table}")
    }
}

impl Tabular for VerificationResult {
    fn to_table(&self, options: TableOptions) -> String {
        let mut out = summary_view(self).to_table(options);
        if self.multi_style_bib.is_some() {
            out.push_str(
                "\n\nBibliography available in APA, MLA, Chicago and IEEE \
                 (citecheck report <file> --style <style>).",
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use cite_core::{Citation, CitationMetadata, CitationStatus, VerificationResult};
    use cite_report::summary_view;

    use super::render;
    use crate::cli::OutputFormat;

    fn result() -> VerificationResult {
        let mut citation = Citation::pending(
            "c1".into(),
            "Smith 2020".into(),
            CitationMetadata {
                title: Some("Finding X".into()),
                ..Default::default()
            },
        );
        citation.status = CitationStatus::Verified;
        citation.confidence = 0.99;
        VerificationResult::new(vec![citation], None)
    }

    #[test]
    fn json_render_is_the_wire_contract() {
        let out = render(&result(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["summary"]["verified"], 1);
        assert_eq!(parsed["citations"][0]["rawText"], "Smith 2020");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&result(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_lists_cards() {
        let out = render(&summary_view(&result()), OutputFormat::Table).expect("table render");
        assert!(out.starts_with("1 citations: 1 verified"));
        assert!(out.contains("VERIFIED"));
        assert!(out.contains("99%"));
        assert!(out.contains("Finding X"));
    }
}
