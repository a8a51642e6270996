//! Canonical fallback panel.
//!
//! Substituted whenever the panel designer fails, answers with something
//! unparseable, or proposes no usable worker. Deterministic: the same
//! round override always yields the same panel.

use super::entities::{PanelOrigin, PanelSpec, RoundCount, WorkerDescriptor};
use crate::core::model::Model;

/// Objective of the fallback panel.
pub const FALLBACK_OBJECTIVE: &str =
    "Produce a validated technical requirements document for the described build.";

/// The four canonical roles, in panel order.
pub fn canonical_workers() -> Vec<WorkerDescriptor> {
    vec![
        WorkerDescriptor::new(
            "Product Strategist",
            "Clarifies goals, users, and scope to anchor engineering decisions.",
            focus(&[
                "Translate user goals into crisp success metrics",
                "Flag scope creep or missing requirements",
            ]),
        )
        .with_model_hint(Model::ClaudeSonnet35),
        WorkerDescriptor::new(
            "Solution Architect",
            "Systems thinker who maps services, data flow, and integration contracts.",
            focus(&[
                "Define system components and responsibilities",
                "Highlight data/storage choices and trade-offs",
            ]),
        )
        .with_model_hint(Model::Gpt4oMini),
        WorkerDescriptor::new(
            "Frontend Lead",
            "Web client expert focused on user journeys and component strategy.",
            focus(&[
                "Outline UX states, routing, and component breakdown",
                "Document client-side data and integration needs",
            ]),
        )
        .with_model_hint(Model::Gemini15Pro),
        WorkerDescriptor::new(
            "Backend & Data Lead",
            "API-first engineer covering services, auth, and persistence.",
            focus(&[
                "Sketch API surface, auth, and workflow orchestration",
                "Propose DB schema, background jobs, and observability",
            ]),
        )
        .with_model_hint(Model::DeepseekR1),
    ]
}

/// Build the fallback panel.
///
/// Uses the override when given, otherwise the minimum round count.
pub fn fallback_panel(rounds_override: Option<RoundCount>, reason: impl Into<String>) -> PanelSpec {
    PanelSpec::from_trusted(
        rounds_override.unwrap_or_default(),
        FALLBACK_OBJECTIVE,
        canonical_workers(),
        PanelOrigin::Fallback {
            reason: reason.into(),
        },
    )
}

fn focus(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
