use std::time::Duration;

use anyhow::Context;
use cite_audit::AuditOptions;
use cite_server::AppState;

use crate::bootstrap;
use crate::cli::root_commands::ServeArgs;

/// Handle `citecheck serve`.
pub async fn handle(args: &ServeArgs) -> anyhow::Result<()> {
    let config = bootstrap::load_config()?;
    let auditor = bootstrap::build_auditor(&config, AuditOptions::from(&config.audit))?;
    let state = AppState::new(
        auditor,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    let bind = args.bind.as_deref().unwrap_or(&config.server.bind);

    tracing::info!(bind, timeout_secs = config.server.request_timeout_secs, "starting server");
    cite_server::serve(state, bind)
        .await
        .with_context(|| format!("server on {bind} failed"))
}

