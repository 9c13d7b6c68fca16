//! Skeptic review application.
//!
//! A second, independent pass may propose a replacement status per citation
//! id. A proposal is applied only when it differs from the current status;
//! its reasoning is appended to the explanation. Proposals are applied in
//! either direction (downgrades and upgrades alike).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Citation;
use crate::enums::CitationStatus;

/// One proposed status change from the review pass.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewProposal {
    pub id: String,
    pub status: CitationStatus,
    #[serde(default)]
    pub reasoning: String,
}

/// Apply review proposals in place. Returns the number of status changes.
///
/// Proposals for unknown ids and proposals of `PENDING` are ignored.
/// Citations without a proposal keep their status and explanation.
pub fn apply_review(citations: &mut [Citation], proposals: &[ReviewProposal]) -> usize {
    let mut changed = 0;
    for proposal in proposals {
        if !proposal.status.is_final() {
            tracing::debug!(id = %proposal.id, "ignoring non-final review status");
            continue;
        }
        let Some(citation) = citations.iter_mut().find(|c| c.id == proposal.id) else {
            tracing::debug!(id = %proposal.id, "review proposal for unknown citation");
            continue;
        };
        if citation.status == proposal.status {
            continue;
        }
        tracing::debug!(
            id = %citation.id,
            from = %citation.status,
            to = %proposal.status,
            "skeptic review changed status"
        );
        citation.revise(proposal.status, &proposal.reasoning);
        changed += 1;
    }
    changed
}
