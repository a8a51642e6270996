//! Draft Execution Plan use case
//!
//! Turns a finished session into an actionable build plan. Drafting is
//! best-effort: any failure yields [`ExecutionPlan::unavailable`].

use crate::ports::reasoning_gateway::ReasoningGateway;
use planner_domain::{ExecutionPlan, ProjectBrief, PromptTemplate, SessionResult};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for drafting the post-session execution plan
pub struct DraftExecutionPlanUseCase<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ReasoningGateway + 'static> DraftExecutionPlanUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, brief: &ProjectBrief, session: &SessionResult) -> ExecutionPlan {
        let brief_summary = brief.summary();
        let requirements = session.document.to_value();
        let prompt = PromptTemplate::execution_plan_prompt(
            &brief_summary,
            &requirements.to_string(),
            &PromptTemplate::debate_log(&session.history),
        );
        let context = json!({
            "team": session.panel,
            "brief_summary": brief_summary,
            "requirements": requirements,
        })
        .to_string();

        match self.gateway.extract_structured(&prompt, &context).await {
            Ok(Some(record)) => match ExecutionPlan::from_record(record) {
                Some(plan) => {
                    info!("Execution plan drafted ({} phases)", plan.phases.len());
                    plan
                }
                None => {
                    warn!("Execution plan had an unexpected shape, using placeholder");
                    ExecutionPlan::unavailable()
                }
            },
            Ok(None) => {
                warn!("Execution planner returned no structured plan, using placeholder");
                ExecutionPlan::unavailable()
            }
            Err(e) => {
                warn!("Execution plan call failed ({}), using placeholder", e);
                ExecutionPlan::unavailable()
            }
        }
    }
}
