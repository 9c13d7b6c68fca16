use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use cite_core::BibliographyStyle;

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server (POST /verify, GET /health)
    Serve(ServeArgs),
    /// Audit the citations in a manuscript
    Verify(VerifyArgs),
    /// Render a saved verification result
    Report(ReportArgs),
    /// Print the JSON schema of the verification result
    Schema,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Manuscript file; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Citations verified in parallel (overrides audit.concurrency)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Skip the skeptic review pass
    #[arg(long)]
    pub no_review: bool,

    /// Disable web-search grounding
    #[arg(long)]
    pub no_grounding: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Verification result JSON; reads stdin when "-"
    pub file: PathBuf,

    /// Print one bibliography style instead of the full report
    #[arg(long, conflicts_with = "summary")]
    pub style: Option<StyleArg>,

    /// Print summary cards in the selected --format instead of the report
    #[arg(long)]
    pub summary: bool,

    /// Page width in characters (overrides report.page_width)
    #[arg(long)]
    pub width: Option<usize>,

    /// Lines per page (overrides report.lines_per_page)
    #[arg(long)]
    pub lines: Option<usize>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StyleArg {
    Apa,
    Mla,
    Chicago,
    Ieee,
}

impl From<StyleArg> for BibliographyStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Apa => Self::Apa,
            StyleArg::Mla => Self::Mla,
            StyleArg::Chicago => Self::Chicago,
            StyleArg::Ieee => Self::Ieee,
        }
    }
}
