//! Orchestration value objects - records produced while a session runs.
//!
//! - [`Contribution`] - one worker's free-text reply in one round
//! - [`DiscussionHistory`] - append-only, round-major list of contributions
//! - [`AggregationOutcome`] - whether final aggregation replaced the document
//! - [`SessionResult`] - terminal output of one planning session

use crate::document::CumulativeDocument;
use crate::panel::{PanelSpec, RoundCount, WorkerId};
use serde::{Deserialize, Serialize};

/// A single worker reply in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub content: String,
    /// 1-based round number
    pub round: usize,
}

impl Contribution {
    pub fn new(
        worker_id: WorkerId,
        worker_name: impl Into<String>,
        content: impl Into<String>,
        round: usize,
    ) -> Self {
        Self {
            worker_id,
            worker_name: worker_name.into(),
            content: content.into(),
            round,
        }
    }
}

/// Ordered, append-only sequence of contributions
///
/// Entries are round-major; within a round they follow panel order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscussionHistory {
    entries: Vec<Contribution>,
}

impl DiscussionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, contribution: Contribution) {
        self.entries.push(contribution);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contribution> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Contribution] {
        &self.entries
    }

    /// The last `n` contributions, regardless of round.
    pub fn recent(&self, n: usize) -> &[Contribution] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

impl<'a> IntoIterator for &'a DiscussionHistory {
    type Item = &'a Contribution;
    type IntoIter = std::slice::Iter<'a, Contribution>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of the final aggregation step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AggregationOutcome {
    /// The aggregated record replaced the per-round document
    #[default]
    Applied,
    /// Aggregation failed; the pre-aggregation document was kept
    Degraded { reason: String },
}

impl AggregationOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, AggregationOutcome::Degraded { .. })
    }
}

/// Terminal output of one planning session (immutable)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResult {
    pub panel: PanelSpec,
    pub history: DiscussionHistory,
    pub document: CumulativeDocument,
    /// Human-readable rendering of `document`
    pub rendered_document: String,
    pub rounds: RoundCount,
    pub aggregation: AggregationOutcome,
}
