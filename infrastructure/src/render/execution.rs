//! Markdown rendering of the execution plan

use planner_domain::ExecutionPlan;
use planner_domain::plan::{PlanPhase, PlanTask};

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

fn task_line(task: &PlanTask) -> String {
    format!(
        "- {}: {} (Owner: {}, DoD: {})\n",
        or(&task.title, "Task"),
        task.details,
        or(&task.owner, "TBD"),
        task.definition_of_done
    )
}

fn phase_block(phase: &PlanPhase) -> String {
    let mut md = format!("\n### {}\n", or(&phase.name, "Phase"));
    if !phase.objective.trim().is_empty() {
        md.push_str(&format!("**Objective:** {}\n", phase.objective));
    }
    if !phase.tasks.is_empty() {
        md.push_str("**Tasks:**\n");
        for task in &phase.tasks {
            md.push_str(&task_line(task));
        }
    }
    if !phase.dependencies.is_empty() {
        md.push_str("**Dependencies:**\n");
        for dependency in &phase.dependencies {
            md.push_str(&format!("- {}\n", dependency));
        }
    }
    md
}

/// Render an execution plan as Markdown.
pub fn render_execution_markdown(plan: &ExecutionPlan) -> String {
    let mut md = String::from("# Execution Plan\n");
    md.push_str(&format!(
        "\n## Overview\n{}\n",
        or(&plan.overview, "No overview provided.")
    ));

    md.push_str("\n## Recommended Tech Stack\n");
    for (label, value) in plan.tech_stack.entries() {
        md.push_str(&format!("- **{}:** {}\n", label, value));
    }
    if !plan.tech_stack.tooling.is_empty() {
        md.push_str(&format!(
            "- **Tooling:** {}\n",
            plan.tech_stack.tooling.join(", ")
        ));
    }

    md.push_str("\n## Phases\n");
    for phase in &plan.phases {
        md.push_str(&phase_block(phase));
    }

    if !plan.risks.is_empty() {
        md.push_str("\n## Risks & Mitigations\n");
        for risk in &plan.risks {
            md.push_str(&format!(
                "- {}: {}\n",
                or(&risk.item, "Risk"),
                or(&risk.mitigation, "Mitigation TBD")
            ));
        }
    }

    if !plan.handoff_instructions.is_empty() {
        md.push_str("\n## Handoff Instructions\n");
        for step in &plan.handoff_instructions {
            md.push_str(&format!("- {}\n", step));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unavailable_plan() {
        let md = render_execution_markdown(&ExecutionPlan::unavailable());
        assert!(md.starts_with("# Execution Plan\n"));
        assert!(md.contains("## Overview\nHigh-level plan unavailable.\n"));
        assert!(!md.contains("## Risks"));
        assert!(!md.contains("## Handoff"));
    }

    #[test]
    fn test_full_plan() {
        let record = json!({
            "overview": "Ship in two phases.",
            "tech_stack": {"frontend": "React", "database": "Postgres", "tooling": ["pnpm", "Docker"]},
            "phases": [{
                "name": "Foundation",
                "objective": "Scaffold the app",
                "tasks": [{"title": "Repo", "details": "Create monorepo", "definition_of_done": "CI green"}],
                "dependencies": ["Cloud account"]
            }],
            "risks": [{"item": "Scope creep"}],
            "handoff_instructions": ["Share credentials"]
        });
        let plan = ExecutionPlan::from_record(record.as_object().cloned().unwrap()).unwrap();

        let md = render_execution_markdown(&plan);

        assert!(md.contains("- **Frontend:** React\n- **Database:** Postgres\n"));
        assert!(md.contains("- **Tooling:** pnpm, Docker\n"));
        assert!(md.contains("### Foundation\n**Objective:** Scaffold the app\n"));
        assert!(md.contains("- Repo: Create monorepo (Owner: TBD, DoD: CI green)\n"));
        assert!(md.contains("**Dependencies:**\n- Cloud account\n"));
        assert!(md.contains("- Scope creep: Mitigation TBD\n"));
        assert!(md.contains("## Handoff Instructions\n- Share credentials\n"));
    }
}
