//! Entity structs for citecheck.
//!
//! Wire-facing structs serialize with `camelCase` keys to match the `/verify`
//! response contract.

mod candidate;
mod citation;
mod evidence;
mod result;

pub use candidate::CandidateCitation;
pub use citation::{Citation, CitationMetadata};
pub use evidence::{GroundingReference, VerificationEvidence};
pub use result::{MultiStyleBibliography, Summary, VerificationResult};

/// Serde helpers shared by entity structs.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Int(i64),
        Text(String),
    }

    /// Accept a year as a JSON number or a numeric string.
    ///
    /// Model output is inconsistent (`2020`, `"2020"`, `"2020a"`, `"n.d."`);
    /// anything without a leading four-digit year becomes `None`.
    pub fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Option::<YearRepr>::deserialize(deserializer)?;
        Ok(match repr {
            Some(YearRepr::Int(year)) => i32::try_from(year).ok(),
            Some(YearRepr::Text(text)) => {
                let digits: String = text.trim().chars().take(4).collect();
                if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
                    digits.parse().ok()
                } else {
                    None
                }
            }
            None => None,
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Int(i64),
        Float(f64),
    }

    /// Accept an id as a string or a number; blank strings become `None`.
    pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Option::<IdRepr>::deserialize(deserializer)?;
        Ok(match repr {
            Some(IdRepr::Text(text)) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            Some(IdRepr::Int(n)) => Some(n.to_string()),
            Some(IdRepr::Float(n)) => Some(n.to_string()),
            None => None,
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AuthorsRepr {
        One(String),
        Many(Vec<Option<String>>),
    }

    /// Accept authors as an array, a single string, or null.
    pub fn lenient_authors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Option::<AuthorsRepr>::deserialize(deserializer)?;
        let authors = match repr {
            Some(AuthorsRepr::One(name)) => vec![name],
            Some(AuthorsRepr::Many(names)) => names.into_iter().flatten().collect(),
            None => Vec::new(),
        };
        Ok(authors
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }
}
