//! Pipeline, server and report settings.

use serde::{Deserialize, Serialize};

const fn default_concurrency() -> usize {
    4
}

const fn default_true() -> bool {
    true
}

fn default_bind() -> String {
    String::from("127.0.0.1:8787")
}

const fn default_request_timeout_secs() -> u64 {
    120
}

const fn default_page_width() -> usize {
    90
}

const fn default_lines_per_page() -> usize {
    50
}

/// Verification pipeline behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Citations verified in parallel within one request.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Run the skeptic review pass after fusion.
    #[serde(default = "default_true")]
    pub review: bool,

    /// Enable web-search grounding on the verification pass.
    #[serde(default = "default_true")]
    pub grounding: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            review: true,
            grounding: true,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Upper bound on one `/verify` request, end to end.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Printable report layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_page_width")]
    pub page_width: usize,

    #[serde(default = "default_lines_per_page")]
    pub lines_per_page: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            lines_per_page: default_lines_per_page(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let audit = AuditConfig::default();
        assert_eq!(audit.concurrency, 4);
        assert!(audit.review);
        assert!(audit.grounding);

        let server = ServerConfig::default();
        assert_eq!(server.bind, "127.0.0.1:8787");
        assert_eq!(server.request_timeout_secs, 120);

        let report = ReportConfig::default();
        assert_eq!(report.page_width, 90);
        assert_eq!(report.lines_per_page, 50);
    }
}
