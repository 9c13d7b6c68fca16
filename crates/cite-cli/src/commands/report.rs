use anyhow::{Context, bail};
use cite_config::ReportConfig;
use cite_core::{BibliographyStyle, VerificationResult};
use cite_report::{PageLayout, bibliography_export, printable, summary_view};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::commands::read_input;
use crate::output::output;

const MIN_WIDTH: usize = 40;
const MIN_LINES: usize = 10;

/// Handle `citecheck report`.
pub fn handle(args: &ReportArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = parse_result(&read_input(Some(&args.file))?)?;

    if let Some(style) = args.style {
        let style = BibliographyStyle::from(style);
        let Some(text) = bibliography_export(&result, style) else {
            bail!("result has no {} bibliography", style.heading());
        };
        println!("{text}");
        return Ok(());
    }

    if args.summary {
        return output(&summary_view(&result), flags.format);
    }

    let config = bootstrap::load_config()?;
    let layout = layout(args, &config.report)?;
    println!("{}", printable(&result, &layout).render_text());
    Ok(())
}

/// Parse a saved result, recomputing the summary when it disagrees with
/// the citations.
fn parse_result(json: &str) -> anyhow::Result<VerificationResult> {
    let result: VerificationResult =
        serde_json::from_str(json).context("input is not a verification result")?;
    if result.summary_is_consistent() {
        return Ok(result);
    }
    tracing::warn!("summary does not match citations; recomputing it");
    Ok(VerificationResult::new(result.citations, result.multi_style_bib))
}

fn layout(args: &ReportArgs, config: &ReportConfig) -> anyhow::Result<PageLayout> {
    let layout = PageLayout {
        width: args.width.unwrap_or(config.page_width),
        lines_per_page: args.lines.unwrap_or(config.lines_per_page),
    };
    if layout.width < MIN_WIDTH {
        bail!("--width must be at least {MIN_WIDTH}");
    }
    if layout.lines_per_page < MIN_LINES {
        bail!("--lines must be at least {MIN_LINES}");
    }
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn args(width: Option<usize>, lines: Option<usize>) -> ReportArgs {
        ReportArgs {
            file: PathBuf::from("-"),
            style: None,
            summary: false,
            width,
            lines,
        }
    }

    fn saved(summary_total: usize) -> String {
        json!({
            "citations": [{
                "id": "c1",
                "rawText": "Smith (2020)",
                "title": "Finding X",
                "status": "VERIFIED",
                "confidence": 0.99,
                "verificationSource": "Crossref + Google Search",
                "explanation": "DOI resolved in Crossref."
            }],
            "summary": { "total": summary_total, "verified": 1, "hallucinated": 0, "unverified": 0 }
        })
        .to_string()
    }

    #[test]
    fn consistent_result_is_kept() {
        let result = parse_result(&saved(1)).expect("result should parse");
        assert_eq!(result.summary.total, 1);
        assert!(result.multi_style_bib.is_none());
    }

    #[test]
    fn inconsistent_summary_is_recomputed() {
        let result = parse_result(&saved(7)).expect("result should parse");
        assert_eq!(result.summary.total, 1);
        assert!(result.summary_is_consistent());
    }

    #[test]
    fn non_result_json_is_rejected() {
        assert!(parse_result(r#"{"text": "hello"}"#).is_err());
    }

    #[test]
    fn layout_uses_config_then_overrides() {
        let config = ReportConfig::default();
        let layout = layout(&args(None, Some(20)), &config).expect("layout");
        assert_eq!(
            layout,
            PageLayout {
                width: config.page_width,
                lines_per_page: 20,
            }
        );
    }

    #[test]
    fn layout_rejects_tiny_pages() {
        let config = ReportConfig::default();
        assert!(layout(&args(Some(20), None), &config).is_err());
        assert!(layout(&args(None, Some(3)), &config).is_err());
    }
}
