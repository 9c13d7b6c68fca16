use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A supporting web reference surfaced by the grounded verification pass.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GroundingReference {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Output of one verification pass: the model's free-text audit plus any
/// grounding references it retrieved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VerificationEvidence {
    pub text: String,
    #[serde(default)]
    pub references: Vec<GroundingReference>,
}

impl VerificationEvidence {
    /// True when at least one reference carries a usable URL.
    #[must_use]
    pub fn has_grounding(&self) -> bool {
        self.references.iter().any(|r| !r.url.trim().is_empty())
    }

    /// URL of the first usable grounding reference.
    #[must_use]
    pub fn first_url(&self) -> Option<&str> {
        self.references
            .iter()
            .map(|r| r.url.trim())
            .find(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reference_urls_do_not_count_as_grounding() {
        let evidence = VerificationEvidence {
            text: "checked".into(),
            references: vec![GroundingReference {
                url: "  ".into(),
                title: None,
            }],
        };
        assert!(!evidence.has_grounding());
        assert!(evidence.first_url().is_none());
    }

    #[test]
    fn first_url_skips_blanks() {
        let evidence = VerificationEvidence {
            text: String::new(),
            references: vec![
                GroundingReference {
                    url: String::new(),
                    title: None,
                },
                GroundingReference {
                    url: "https://example.org/paper".into(),
                    title: Some("Paper".into()),
                },
            ],
        };
        assert!(evidence.has_grounding());
        assert_eq!(evidence.first_url(), Some("https://example.org/paper"));
    }
}
