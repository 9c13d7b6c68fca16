//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use cite_config::GeminiConfig;
use cite_core::{
    CandidateCitation, Citation, GroundingReference, MultiStyleBibliography, ReviewProposal,
    VerificationEvidence,
};
use serde::{Deserialize, Serialize};

use crate::error::GenAiError;
use crate::prompts::{self, AuditPrompt};
use crate::{CitationAssistant, parse};

/// Longest error body kept in [`GenAiError::Api`].
const MAX_ERROR_BODY: usize = 300;

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// Web references from the first candidate's grounding metadata.
    fn references(&self) -> Vec<GroundingReference> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        let url = web.uri.as_deref()?.trim();
                        (!url.is_empty()).then(|| GroundingReference {
                            url: url.to_string(),
                            title: web.title.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// How a single call should be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// JSON response mode, no tools.
    Json,
    /// Free text, optionally with the `google_search` tool.
    Search { grounding: bool },
}

/// Gemini-backed [`CitationAssistant`].
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from a validated `[gemini]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::MissingApiKey`] when the key is blank, or
    /// [`GenAiError::Http`] if the HTTP client fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, GenAiError> {
        if !config.is_configured() {
            return Err(GenAiError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.trim().to_string(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
        })
    }

    fn build_request(prompt: String, mode: Mode) -> GenerateRequest {
        let contents = vec![Content {
            role: Some(String::from("user")),
            parts: vec![Part { text: Some(prompt) }],
        }];
        match mode {
            Mode::Json => GenerateRequest {
                contents,
                generation_config: Some(GenerationConfig {
                    response_mime_type: "application/json",
                    temperature: 0.1,
                }),
                tools: Vec::new(),
            },
            Mode::Search { grounding } => GenerateRequest {
                contents,
                generation_config: None,
                tools: if grounding {
                    vec![Tool {
                        google_search: EmptyObject {},
                    }]
                } else {
                    Vec::new()
                },
            },
        }
    }

    async fn generate(&self, prompt: String, mode: Mode) -> Result<GenerateResponse, GenAiError> {
        let body = Self::build_request(prompt, mode);
        tracing::debug!(endpoint = %self.endpoint, ?mode, "gemini request");

        let url = format!("{}?key={}", self.endpoint, urlencoding::encode(&self.api_key));
        // Errors carry the request URL; strip it so the key never reaches logs.
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = resp.status();
        let text = resp.text().await.map_err(reqwest::Error::without_url)?;
        if !status.is_success() {
            let mut message = text;
            if let Some((cut, _)) = message.char_indices().nth(MAX_ERROR_BODY) {
                message.truncate(cut);
            }
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = ?usage.prompt_token_count,
                response_tokens = ?usage.candidates_token_count,
                "gemini usage"
            );
        }
        if let Some(reason) = parsed
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|reason| *reason != "STOP")
        {
            tracing::warn!(reason, "gemini finished early");
        }
        Ok(parsed)
    }

    async fn generate_text(&self, prompt: String) -> Result<String, GenAiError> {
        self.generate(prompt, Mode::Json)
            .await?
            .text()
            .ok_or(GenAiError::EmptyResponse)
    }
}

#[async_trait]
impl CitationAssistant for GeminiClient {
    async fn extract(&self, text: &str) -> Result<Vec<CandidateCitation>, GenAiError> {
        let output = self.generate_text(prompts::extraction(text)).await?;
        parse::parse_candidates(&output)
    }

    async fn verify_one(
        &self,
        prompt: &AuditPrompt,
        grounding: bool,
    ) -> Result<VerificationEvidence, GenAiError> {
        let response = self
            .generate(prompt.render(), Mode::Search { grounding })
            .await?;
        Ok(VerificationEvidence {
            text: response.text().unwrap_or_default(),
            references: response.references(),
        })
    }

    async fn review_batch(&self, citations: &[Citation]) -> Result<Vec<ReviewProposal>, GenAiError> {
        let output = self.generate_text(prompts::review(citations)).await?;
        parse::parse_review(&output)
    }

    async fn render_bibliography(
        &self,
        citations: &[Citation],
    ) -> Result<MultiStyleBibliography, GenAiError> {
        let output = self.generate_text(prompts::bibliography(citations)).await?;
        parse::parse_bibliography(&output)
    }
}
