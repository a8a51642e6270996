//! Design Panel use case
//!
//! Asks the reasoning service for a panel proposal and normalises it.
//! Panel design never fails: an unavailable or unusable proposal degrades
//! to the canonical fallback panel.

use crate::ports::reasoning_gateway::ReasoningGateway;
use planner_domain::{
    PanelSpec, ProjectBrief, PromptTemplate, RoundCount, fallback_panel, normalize_candidate,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for forming the planning panel
pub struct DesignPanelUseCase<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ReasoningGateway + 'static> DesignPanelUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Produce a panel for `brief`. An explicit `rounds_override` always wins
    /// over the designer's suggestion.
    pub async fn execute(
        &self,
        brief: &ProjectBrief,
        rounds_override: Option<RoundCount>,
    ) -> PanelSpec {
        let context = PromptTemplate::designer_context(brief, rounds_override);
        let candidate = self
            .gateway
            .extract_structured(PromptTemplate::designer_system(), &context)
            .await;

        let panel = match candidate {
            Ok(Some(record)) => match normalize_candidate(&Value::Object(record), rounds_override)
            {
                Ok(panel) => panel,
                Err(rejected) => {
                    warn!("Panel proposal rejected ({}), using fallback panel", rejected);
                    fallback_panel(rounds_override, rejected.to_string())
                }
            },
            Ok(None) => {
                warn!("Panel designer returned no structured proposal, using fallback panel");
                fallback_panel(rounds_override, "designer returned no structured proposal")
            }
            Err(e) => {
                warn!("Panel design call failed ({}), using fallback panel", e);
                fallback_panel(rounds_override, format!("designer call failed: {}", e))
            }
        };

        info!(
            "Panel ready: {} workers, {} rounds{}",
            panel.workers().len(),
            panel.rounds(),
            if panel.origin().is_fallback() { " (fallback)" } else { "" }
        );
        for worker in panel.workers() {
            debug!("Panel worker {} ({})", worker.id, worker.name);
        }
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{DesignerReply, StubGateway};
    use serde_json::json;

    fn brief() -> ProjectBrief {
        ProjectBrief::from_json_str(r#"{"project": {"title": "Inventory Tracker"}}"#).unwrap()
    }

    #[tokio::test]
    async fn test_designed_panel_is_normalised() {
        let gateway = StubGateway::new().with_designer(DesignerReply::Record(json!({
            "rounds": 7,
            "shared_objective": "Write the SRD.",
            "agents": [
                {"name": "Data Engineer", "focus": ["Schemas"], "model_hint": "Gemini"},
                {"name": "", "focus": ["dropped"]},
                {"name": "QA Lead"}
            ]
        })));
        let use_case = DesignPanelUseCase::new(Arc::new(gateway));

        let panel = use_case.execute(&brief(), None).await;

        assert!(!panel.origin().is_fallback());
        assert_eq!(panel.rounds().get(), RoundCount::MAX);
        assert_eq!(panel.shared_objective(), "Write the SRD.");
        let ids: Vec<_> = panel.workers().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["data-engineer", "qa-lead"]);
        assert!(!panel.workers()[1].focus.is_empty());
    }

    #[tokio::test]
    async fn test_override_wins_over_suggestion() {
        let gateway = StubGateway::new().with_designer(DesignerReply::Record(json!({
            "rounds": 4,
            "agents": [{"name": "Architect"}]
        })));
        let use_case = DesignPanelUseCase::new(Arc::new(gateway));

        let panel = use_case.execute(&brief(), RoundCount::new(2).ok()).await;
        assert_eq!(panel.rounds().get(), 2);
    }

    #[tokio::test]
    async fn test_absent_proposal_falls_back() {
        let gateway = StubGateway::new().with_designer(DesignerReply::Absent);
        let use_case = DesignPanelUseCase::new(Arc::new(gateway));

        let panel = use_case.execute(&brief(), None).await;

        assert!(panel.origin().is_fallback());
        assert_eq!(panel.rounds().get(), 2);
        assert_eq!(panel.workers().len(), 4);
        for worker in panel.workers() {
            assert!(!worker.id.as_str().is_empty());
            assert!(!worker.focus.is_empty());
        }
    }

    #[tokio::test]
    async fn test_failed_call_falls_back_with_override() {
        let gateway = StubGateway::new().with_designer(DesignerReply::Fail);
        let use_case = DesignPanelUseCase::new(Arc::new(gateway));

        let panel = use_case.execute(&brief(), RoundCount::new(3).ok()).await;

        assert!(panel.origin().is_fallback());
        assert_eq!(panel.rounds().get(), 3);
    }

    #[tokio::test]
    async fn test_proposal_without_named_workers_falls_back() {
        let gateway = StubGateway::new().with_designer(DesignerReply::Record(json!({
            "rounds": 3,
            "agents": [{"persona": "nameless"}]
        })));
        let use_case = DesignPanelUseCase::new(Arc::new(gateway));

        let panel = use_case.execute(&brief(), None).await;

        assert!(panel.origin().is_fallback());
        assert_eq!(panel.rounds().get(), 2);
    }
}
