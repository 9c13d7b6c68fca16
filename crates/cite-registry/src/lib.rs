//! # cite-registry
//!
//! Crossref metadata registry client for citecheck.
//!
//! Resolves a DOI to a bibliographic record via `GET /works/{doi}`. The
//! [`MetadataLookup`] trait is the seam the verification pipeline consumes:
//! its [`MetadataLookup::find`] turns every failure into "not found" so a
//! registry outage degrades one citation's evidence instead of aborting the
//! batch.

mod crossref;
mod error;
mod http;

pub use error::RegistryError;

use async_trait::async_trait;
use cite_config::RegistryConfig;
use cite_core::CitationMetadata;

// ── Types ──────────────────────────────────────────────────────────

/// Normalized bibliographic record from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRecord {
    /// DOI as reported by the registry.
    pub doi: String,
    pub title: Option<String>,
    /// Author display names in registry order.
    pub authors: Vec<String>,
    pub year: Option<i32>,
    /// Journal or proceedings title.
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    /// Canonical landing URL.
    pub url: Option<String>,
}

impl WorkRecord {
    /// Registry fields as citation metadata, ready to overlay.
    #[must_use]
    pub fn into_metadata(self) -> CitationMetadata {
        CitationMetadata {
            title: self.title,
            authors: self.authors,
            year: self.year,
            doi: Some(self.doi),
            journal: self.journal,
            volume: self.volume,
            issue: self.issue,
        }
    }
}

// ── Lookup seam ────────────────────────────────────────────────────

/// Resolve a DOI to a registry record.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Look up `doi`. `Ok(None)` means the registry has no such record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] on transport, status, or payload failures.
    async fn lookup(&self, doi: &str) -> Result<Option<WorkRecord>, RegistryError>;

    /// Look up `doi`, logging failures and treating them as "not found".
    async fn find(&self, doi: &str) -> Option<WorkRecord> {
        match self.lookup(doi).await {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(doi, %error, "registry lookup failed; treating as not found");
                None
            }
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the Crossref REST API.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Build a client from the `[registry]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent(&config.mailto))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL for a DOI (resolver prefixes stripped, path-encoded).
    #[must_use]
    pub fn works_url(&self, doi: &str) -> String {
        format!(
            "{}/works/{}",
            self.base_url,
            urlencoding::encode(&cite_core::doi::normalize(doi))
        )
    }
}

#[async_trait]
impl MetadataLookup for RegistryClient {
    async fn lookup(&self, doi: &str) -> Result<Option<WorkRecord>, RegistryError> {
        if cite_core::doi::normalize(doi).is_empty() {
            return Ok(None);
        }
        let url = self.works_url(doi);
        tracing::debug!(%url, "registry lookup");

        let Some(resp) = http::classify(self.http.get(&url).send().await?).await? else {
            return Ok(None);
        };
        let body = resp.text().await?;
        let envelope: crossref::WorkEnvelope =
            serde_json::from_str(&body).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Ok(Some(WorkRecord::from(envelope.message)))
    }
}

fn user_agent(mailto: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let mailto = mailto.trim();
    if mailto.is_empty() {
        format!("citecheck/{version}")
    } else {
        format!("citecheck/{version} (mailto:{mailto})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> RegistryClient {
        RegistryClient::new(&RegistryConfig {
            base_url: "https://api.crossref.org/".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn works_url_strips_resolver_and_encodes() {
        let url = client().works_url("https://doi.org/10.1000/xyz123");
        assert_eq!(url, "https://api.crossref.org/works/10.1000%2Fxyz123");
    }

    #[test]
    fn user_agent_carries_mailto_when_set() {
        assert!(user_agent("").starts_with("citecheck/"));
        assert!(user_agent("ed@example.org").ends_with("(mailto:ed@example.org)"));
    }

    #[test]
    fn record_converts_to_metadata() {
        let record = WorkRecord {
            doi: "10.1000/xyz123".into(),
            title: Some("Finding X".into()),
            authors: vec!["Jane Smith".into()],
            year: Some(2020),
            journal: None,
            volume: None,
            issue: None,
            url: None,
        };
        let meta = record.into_metadata();
        assert_eq!(meta.doi.as_deref(), Some("10.1000/xyz123"));
        assert_eq!(meta.year, Some(2020));
    }

    struct Failing;

    #[async_trait]
    impl MetadataLookup for Failing {
        async fn lookup(&self, _doi: &str) -> Result<Option<WorkRecord>, RegistryError> {
            Err(RegistryError::Parse("truncated payload".into()))
        }
    }

    #[tokio::test]
    async fn find_degrades_errors_to_not_found() {
        assert!(Failing.find("10.1000/xyz123").await.is_none());
    }

    #[tokio::test]
    async fn blank_identifier_skips_the_network() {
        let result = client().lookup("https://doi.org/").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_lookup_known_doi() {
        let record = client().lookup("10.1038/nphys1170").await.unwrap();
        let record = record.expect("known DOI should resolve");
        println!("{record:#?}");
        assert!(record.title.is_some());
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_lookup_unknown_doi_is_none() {
        let record = client()
            .lookup("10.0000/definitely-not-a-real-doi-citecheck")
            .await
            .unwrap();
        assert!(record.is_none());
    }
}
