//! Events emitted by a planning session

use super::value_objects::{Contribution, SessionResult};
use crate::panel::PanelSpec;
use serde::Serialize;

/// Lifecycle event delivered to an event sink
///
/// Serialized as `{"type": ..., "payload": ...}`. For one session the order
/// is `panel_ready`, then per round one `contribution` per worker in panel
/// order followed by `round_complete`, then `final` (or `error`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlanEvent {
    PanelReady(PanelSpec),
    Contribution(Contribution),
    RoundComplete { round: usize },
    Final(Box<SessionResult>),
    Error { kind: String, message: String },
}

impl PlanEvent {
    pub fn type_name(&self) -> &'static str {
        match self {
            PlanEvent::PanelReady(_) => "panel_ready",
            PlanEvent::Contribution(_) => "contribution",
            PlanEvent::RoundComplete { .. } => "round_complete",
            PlanEvent::Final(_) => "final",
            PlanEvent::Error { .. } => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PlanEvent::Final(_) | PlanEvent::Error { .. })
    }
}
