//! Orchestration domain entities

use super::value_objects::{AggregationOutcome, Contribution, DiscussionHistory, SessionResult};
use crate::document::{CumulativeDocument, DocumentUpdate};
use crate::panel::{PanelSpec, RoundCount};
use serde::{Deserialize, Serialize};

/// Phase of a planning session
///
/// `Init -> RoundActive (xN) -> Aggregating -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Init,
    RoundActive,
    Aggregating,
    Done,
}

/// Mutable state of one session between rounds (Entity)
///
/// Owned by a single orchestration loop. The document and history only
/// change through [`apply`](Self::apply), which requires an active round.
#[derive(Debug, Clone)]
pub struct RoundState {
    phase: SessionPhase,
    /// Completed rounds
    round_index: usize,
    max_rounds: RoundCount,
    document: CumulativeDocument,
    history: DiscussionHistory,
}

impl RoundState {
    pub fn new(max_rounds: RoundCount) -> Self {
        Self {
            phase: SessionPhase::Init,
            round_index: 0,
            max_rounds,
            document: CumulativeDocument::from_template(),
            history: DiscussionHistory::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Number of rounds completed so far.
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn max_rounds(&self) -> RoundCount {
        self.max_rounds
    }

    pub fn document(&self) -> &CumulativeDocument {
        &self.document
    }

    pub fn history(&self) -> &DiscussionHistory {
        &self.history
    }

    /// Start the next round and return its 1-based number.
    ///
    /// Returns `None` once every round has run; the state is then
    /// `Aggregating`.
    pub fn begin_round(&mut self) -> Option<usize> {
        match self.phase {
            SessionPhase::Init | SessionPhase::RoundActive
                if self.round_index < self.max_rounds.as_usize() =>
            {
                self.phase = SessionPhase::RoundActive;
                Some(self.round_index + 1)
            }
            SessionPhase::Init | SessionPhase::RoundActive => {
                self.phase = SessionPhase::Aggregating;
                None
            }
            SessionPhase::Aggregating | SessionPhase::Done => None,
        }
    }

    /// Merge one worker's update and record its contribution.
    ///
    /// Ignored unless a round is active and the contribution belongs to it.
    pub fn apply(&mut self, contribution: Contribution, update: &DocumentUpdate) -> bool {
        if self.phase != SessionPhase::RoundActive || contribution.round != self.round_index + 1 {
            return false;
        }
        self.document.merge(update);
        self.history.push(contribution);
        true
    }

    /// Close the active round.
    pub fn end_round(&mut self) {
        if self.phase == SessionPhase::RoundActive {
            self.round_index += 1;
        }
    }

    /// Replace the document with an aggregated one.
    pub fn replace_document(&mut self, document: CumulativeDocument) {
        if self.phase == SessionPhase::Aggregating {
            self.document = document;
        }
    }

    /// Move to `Done` and produce the immutable session result.
    pub fn finish(
        mut self,
        panel: PanelSpec,
        aggregation: AggregationOutcome,
        rendered_document: String,
    ) -> SessionResult {
        self.phase = SessionPhase::Done;
        SessionResult {
            panel,
            history: self.history,
            document: self.document,
            rendered_document,
            rounds: self.max_rounds,
            aggregation,
        }
    }
}
