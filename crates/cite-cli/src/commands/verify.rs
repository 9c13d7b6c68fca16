use anyhow::bail;
use cite_audit::AuditOptions;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::VerifyArgs;
use crate::commands::read_input;
use crate::output::output;

/// Handle `citecheck verify`.
pub async fn handle(args: &VerifyArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_input(args.file.as_deref())?;
    if text.trim().is_empty() {
        bail!("manuscript text is empty");
    }

    let config = bootstrap::load_config()?;
    let options = options(AuditOptions::from(&config.audit), args);
    let auditor = bootstrap::build_auditor(&config, options)?;

    let result = auditor.verify(&text).await?;
    output(&result, flags.format)
}

fn options(mut options: AuditOptions, args: &VerifyArgs) -> AuditOptions {
    if let Some(concurrency) = args.concurrency {
        options.concurrency = concurrency.max(1);
    }
    options.review &= !args.no_review;
    options.grounding &= !args.no_grounding;
    options
}
