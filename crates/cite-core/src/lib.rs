//! # cite-core
//!
//! Core types and deterministic policy for citecheck.
//!
//! This crate provides the foundational pieces shared across all citecheck crates:
//! - Citation, summary, and bibliography types (the `/verify` wire contract)
//! - `CitationStatus` and bibliography style enums
//! - DOI identifier extraction from raw citation text
//! - Evidence fusion: registry + grounding + fabrication signals → status label
//! - Skeptic review application (append-only explanation)
//! - Citation ID allocation
//! - Cross-cutting error types

pub mod doi;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod fusion;
pub mod ids;
pub mod review;

pub use entities::{
    CandidateCitation, Citation, CitationMetadata, GroundingReference, MultiStyleBibliography,
    Summary, VerificationEvidence, VerificationResult,
};
pub use enums::{BibliographyStyle, CitationStatus};
pub use errors::CoreError;
pub use fusion::{Evidence, Fusion, fuse};
pub use review::{ReviewProposal, apply_review};
