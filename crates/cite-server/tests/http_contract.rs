//! HTTP contract for `/verify` and `/health`, driven through `oneshot`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use cite_audit::{AuditOptions, Auditor};
use cite_core::{
    CandidateCitation, Citation, GroundingReference, MultiStyleBibliography, ReviewProposal,
    VerificationEvidence,
};
use cite_genai::{AuditPrompt, CitationAssistant, GenAiError};
use cite_registry::{MetadataLookup, RegistryError, WorkRecord};
use cite_server::{AppState, build_router};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

// ── Fakes ──────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Behaviour {
    /// One citation, grounded and registry-matched.
    Verified,
    /// Extraction fails upstream.
    ExtractionFails,
    /// Extraction hangs past any reasonable timeout.
    Hangs,
}

struct StubAssistant(Behaviour);

#[async_trait]
impl CitationAssistant for StubAssistant {
    async fn extract(&self, text: &str) -> Result<Vec<CandidateCitation>, GenAiError> {
        match self.0 {
            Behaviour::Verified => Ok(vec![CandidateCitation {
                id: Some("c1".into()),
                raw_text: text.into(),
                ..Default::default()
            }]),
            Behaviour::ExtractionFails => Err(GenAiError::Api {
                status: 500,
                message: "upstream secret detail".into(),
            }),
            Behaviour::Hangs => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn verify_one(
        &self,
        _prompt: &AuditPrompt,
        _grounding: bool,
    ) -> Result<VerificationEvidence, GenAiError> {
        Ok(VerificationEvidence {
            text: "Published as cited.".into(),
            references: vec![GroundingReference {
                url: "https://example.org/paper".into(),
                title: None,
            }],
        })
    }

    async fn review_batch(&self, _citations: &[Citation]) -> Result<Vec<ReviewProposal>, GenAiError> {
        Ok(Vec::new())
    }

    async fn render_bibliography(
        &self,
        _citations: &[Citation],
    ) -> Result<MultiStyleBibliography, GenAiError> {
        Ok(MultiStyleBibliography {
            apa: "APA".into(),
            mla: "MLA".into(),
            chicago: "Chicago".into(),
            ieee: "IEEE".into(),
        })
    }
}

struct StubRegistry;

#[async_trait]
impl MetadataLookup for StubRegistry {
    async fn lookup(&self, doi: &str) -> Result<Option<WorkRecord>, RegistryError> {
        Ok(Some(WorkRecord {
            doi: doi.into(),
            title: Some("Finding X".into()),
            authors: vec!["Jane Smith".into()],
            year: Some(2020),
            journal: None,
            volume: None,
            issue: None,
            url: None,
        }))
    }
}

fn app(behaviour: Behaviour, timeout: Duration) -> axum::Router {
    let auditor = Auditor::new(
        Arc::new(StubAssistant(behaviour)),
        Arc::new(StubRegistry),
        AuditOptions::default(),
    );
    build_router(AppState::new(auditor, timeout))
}

fn verify_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const SMITH: &str = "Smith (2020) found X [doi: 10.1000/xyz123]";

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn verify_returns_result_contract() {
    let resp = app(Behaviour::Verified, Duration::from_secs(5))
        .oneshot(verify_request(json!({ "text": SMITH }).to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["summary"], json!({"total": 1, "verified": 1, "hallucinated": 0, "unverified": 0}));
    assert_eq!(body["citations"][0]["status"], "VERIFIED");
    assert_eq!(body["citations"][0]["confidence"], 0.99);
    assert_eq!(body["citations"][0]["verificationSource"], "Crossref + Google Search");
    assert_eq!(body["multiStyleBib"]["ieee"], "IEEE");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let resp = app(Behaviour::Verified, Duration::from_secs(5))
        .oneshot(verify_request("{not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn missing_text_is_bad_request() {
    let resp = app(Behaviour::Verified, Duration::from_secs(5))
        .oneshot(verify_request(json!({ "body": SMITH }).to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_text_is_bad_request() {
    let resp = app(Behaviour::Verified, Duration::from_secs(5))
        .oneshot(verify_request(json!({ "text": "  \n " }).to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "Text must not be empty");
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let resp = app(Behaviour::Verified, Duration::from_secs(5))
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/verify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn pipeline_failure_is_generic_500() {
    let resp = app(Behaviour::ExtractionFails, Duration::from_secs(5))
        .oneshot(verify_request(json!({ "text": SMITH }).to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({ "error": "Verification failed" }));
}

#[tokio::test]
async fn timeout_is_generic_500() {
    let resp = app(Behaviour::Hangs, Duration::from_millis(50))
        .oneshot(verify_request(json!({ "text": SMITH }).to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"], "Verification failed");
}

#[tokio::test]
async fn health_reports_version() {
    let resp = app(Behaviour::Verified, Duration::from_secs(5))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
