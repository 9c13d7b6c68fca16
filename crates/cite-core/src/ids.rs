//! Citation ID allocation.
//!
//! IDs look like `cit-a3f8b2c1`: a prefix plus 8 lowercase hex chars from the
//! OS random source. Extractor-supplied IDs are kept when they are non-blank
//! and not already taken within the current run.

use std::collections::HashSet;

use crate::errors::CoreError;

/// Prefix for generated citation IDs.
pub const CITATION_PREFIX: &str = "cit";

/// Generate a fresh random citation ID.
///
/// # Errors
///
/// Returns [`CoreError::IdGeneration`] if the OS random source is unavailable.
pub fn generate_id() -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::IdGeneration(e.to_string()))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{CITATION_PREFIX}-{hex}"))
}

/// Hands out IDs that are unique within one pipeline run.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `preferred` if it is usable, otherwise a generated ID.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdGeneration`] if a fresh ID is needed and the
    /// random source fails.
    pub fn claim(&mut self, preferred: Option<&str>) -> Result<String, CoreError> {
        if let Some(preferred) = preferred.map(str::trim).filter(|p| !p.is_empty()) {
            if self.used.insert(preferred.to_string()) {
                return Ok(preferred.to_string());
            }
            tracing::debug!(id = preferred, "duplicate citation id from extractor; regenerating");
        }
        loop {
            let candidate = generate_id()?;
            if self.used.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
    }
}
