//! Crossref metadata registry configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("https://api.crossref.org")
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Registry API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contact address sent in the `User-Agent` (Crossref "polite pool").
    #[serde(default)]
    pub mailto: String,

    /// Per-lookup HTTP timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mailto: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
