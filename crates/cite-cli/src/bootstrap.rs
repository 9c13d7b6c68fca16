use std::sync::Arc;

use anyhow::Context;
use cite_audit::{AuditOptions, Auditor};
use cite_config::CitecheckConfig;
use cite_genai::GeminiClient;
use cite_registry::RegistryClient;

/// Load `.env` and the layered configuration.
pub fn load_config() -> anyhow::Result<CitecheckConfig> {
    CitecheckConfig::load_with_dotenv().context("failed to load citecheck configuration")
}

/// Wire the production collaborators into an [`Auditor`].
///
/// Fails before any request is made when the Gemini key is missing.
pub fn build_auditor(config: &CitecheckConfig, options: AuditOptions) -> anyhow::Result<Auditor> {
    let gemini = config.require_gemini()?;
    let assistant = GeminiClient::new(gemini).context("failed to build Gemini client")?;
    let registry =
        RegistryClient::new(&config.registry).context("failed to build Crossref client")?;
    tracing::debug!(?gemini, ?options, "collaborators ready");
    Ok(Auditor::new(Arc::new(assistant), Arc::new(registry), options))
}
