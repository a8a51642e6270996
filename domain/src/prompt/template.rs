//! Prompt templates for the planning flow

use crate::brief::ProjectBrief;
use crate::document::template_json;
use crate::orchestration::value_objects::{Contribution, DiscussionHistory};
use crate::panel::{RoundCount, WorkerDescriptor};
use crate::plan::ExecutionPlan;
use serde_json::json;

/// Transcript placeholder for the first worker turns of a session.
pub const NO_PRIOR_RESPONSES: &str = "No prior responses yet.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the panel designer
    pub fn designer_system() -> &'static str {
        r#"You design the planning panel for a software build.
Given a structured project brief (JSON), choose the experts who should debate its technical requirements.
Respond with STRICT minified JSON of this shape:
{"rounds": int, "shared_objective": str, "agents": [{"name": str, "persona": str, "focus": [str], "model_hint": str}]}

Rules:
- Choose 3 to 5 agents depending on project complexity.
- Include at least one architecture role and one implementation role.
- rounds is 2 unless the brief is complex (commerce, multi-platform, AI workflows), then 3.
- persona is a short description of the agent's reasoning style.
- focus is an ordered list of responsibilities tailored to the brief.
- model_hint names the best-suited model family (Claude, GPT-4o-mini, Gemini, DeepSeek).
- shared_objective is one sentence naming the technical requirements document the panel must produce."#
    }

    /// Context payload for the panel designer
    pub fn designer_context(brief: &ProjectBrief, rounds_hint: Option<RoundCount>) -> String {
        json!({
            "brief": brief.to_value(),
            "rounds_hint": rounds_hint.map(RoundCount::get),
        })
        .to_string()
    }

    /// System prompt for one panel worker
    pub fn worker_system(worker: &WorkerDescriptor) -> String {
        format!(
            "You are {} - {}. You contribute to a collaborative technical planning session. \
             Stay concise (200 words at most) yet specific.",
            worker.name,
            worker.persona.trim().trim_end_matches('.')
        )
    }

    /// User prompt for one worker turn
    pub fn worker_prompt(
        round: usize,
        max_rounds: RoundCount,
        shared_objective: &str,
        brief_summary: &str,
        worker: &WorkerDescriptor,
        recent: &[Contribution],
    ) -> String {
        let focus = worker
            .focus
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Round {round} of {max_rounds} of the planning session.
Shared Objective: {objective}

Project Brief:
{brief_summary}

Your Focus Areas:
{focus}

Recent Messages:
{transcript}

Guidelines:
1. Give 3-4 bullet insights with concrete recommendations.
2. Name risks or dependencies where they exist.
3. Specify API endpoints, data fields or stack choices relevant to your focus.
4. Finish with a short handoff suggestion for the next agent."#,
            objective = shared_objective.trim_end_matches('.'),
            transcript = Self::transcript(recent),
        )
    }

    /// Render recent contributions as `"{name}: {content}"` lines.
    pub fn transcript(recent: &[Contribution]) -> String {
        if recent.is_empty() {
            return NO_PRIOR_RESPONSES.to_string();
        }
        recent
            .iter()
            .map(|c| format!("{}: {}", c.worker_name, c.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Instruction for turning one worker note into a document update
    pub fn extraction_prompt() -> String {
        format!(
            "You convert one agent's planning notes into a JSON patch for a software requirements document.\n\
             Return STRICT JSON containing only the fields the notes justify, using this schema:\n{}",
            template_json()
        )
    }

    /// Context payload for extraction
    pub fn extraction_context(worker_name: &str, note: &str, brief_summary: &str) -> String {
        json!({
            "agent": worker_name,
            "note": note,
            "brief": brief_summary,
        })
        .to_string()
    }

    /// Instruction for the final aggregation step
    pub fn aggregator_prompt() -> String {
        format!(
            "You are the aggregator. Combine the project brief and the full multi-agent debate into an \
             updated technical requirements JSON document using this schema:\n{}\n\
             Focus on technical feasibility, architecture, APIs, data and testing. Do not repeat the conversation.",
            template_json()
        )
    }

    /// Context payload for aggregation: brief, full history and current document
    pub fn aggregation_context(
        brief: &ProjectBrief,
        history: &DiscussionHistory,
        current: &serde_json::Value,
    ) -> String {
        let history: Vec<_> = history
            .iter()
            .map(|c| json!({"role": c.worker_name, "content": c.content, "round": c.round}))
            .collect();
        json!({
            "brief": brief.to_value(),
            "history": history,
            "current": current,
        })
        .to_string()
    }

    /// Chronological debate log used by the execution planner
    pub fn debate_log(history: &DiscussionHistory) -> String {
        if history.is_empty() {
            return "No debate captured.".to_string();
        }
        history
            .iter()
            .map(|c| format!("- Round {}: {}: {}", c.round, c.worker_name, c.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Instruction for drafting the execution plan
    pub fn execution_plan_prompt(
        brief_summary: &str,
        requirements_json: &str,
        debate_log: &str,
    ) -> String {
        let shape = serde_json::to_string(&ExecutionPlan::skeleton()).unwrap_or_default();
        format!(
            r#"You are the build orchestrator. Turn the following context into an actionable execution plan for the delivery team.
Context:
- Project Brief: {brief_summary}
- Requirements JSON: {requirements_json}
- Debate Highlights (chronological):
{debate_log}

Return STRICT minified JSON shaped like:
{shape}

Rules:
- Tasks cover frontend, backend, QA and deployment when relevant.
- The tech stack names concrete frameworks, services or SDKs.
- Each definition_of_done can be verified by a single engineer."#
        )
    }
}
