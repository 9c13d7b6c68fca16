//! # cite-config
//!
//! Layered configuration loading for citecheck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CITECHECK_*` prefix, `__` as separator)
//! 2. Conventional credential variables (`GEMINI_API_KEY`, then `API_KEY`)
//! 3. Project-level `.citecheck/config.toml`
//! 4. User-level `~/.config/citecheck/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CITECHECK_GEMINI__API_KEY` -> `gemini.api_key`,
//! `CITECHECK_AUDIT__CONCURRENCY` -> `audit.concurrency`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cite_config::CitecheckConfig;
//!
//! let config = CitecheckConfig::load_with_dotenv().expect("config");
//! let gemini = config.require_gemini().expect("GEMINI_API_KEY must be set");
//! println!("model: {}", gemini.model);
//! ```

mod error;
mod gemini;
mod general;
mod registry;

pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::{AuditConfig, ReportConfig, ServerConfig};
pub use registry::RegistryConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all citecheck settings.
pub const ENV_PREFIX: &str = "CITECHECK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CitecheckConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl CitecheckConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".citecheck/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Conventional credential names
        figment = figment
            .merge(
                Env::raw()
                    .only(&["API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            );

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// The Gemini section, or an error when no credential is available.
    ///
    /// Called once at startup so a missing key fails before any request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the API key is blank.
    pub fn require_gemini(&self) -> Result<&GeminiConfig, ConfigError> {
        if self.gemini.is_configured() {
            Ok(&self.gemini)
        } else {
            Err(ConfigError::NotConfigured {
                section: String::from("gemini"),
                hint: String::from("set GEMINI_API_KEY or CITECHECK_GEMINI__API_KEY"),
            })
        }
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.audit.concurrency == 0 {
            return Err(invalid("audit.concurrency", "must be at least 1"));
        }
        if self.report.page_width < 40 {
            return Err(invalid("report.page_width", "must be at least 40"));
        }
        if self.report.lines_per_page < 10 {
            return Err(invalid("report.lines_per_page", "must be at least 10"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("citecheck").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
