//! Console output formatter for planning results

use colored::Colorize;
use planner_domain::{AggregationOutcome, ExecutionPlan, PanelSpec, SessionResult};
use serde_json::json;

/// Formats planning results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete session: panel, debate, document and plan
    ///
    /// `execution_plan` is the already-rendered plan, if one was drafted.
    pub fn format_full(result: &SessionResult, execution_plan: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Swarm Planner Session"));
        output.push('\n');

        output.push_str(&Self::panel(&result.panel));

        output.push_str(&Self::section_header(&format!(
            "Debate ({} rounds)",
            result.rounds
        )));
        let mut current_round = 0;
        for contribution in &result.history {
            if contribution.round != current_round {
                current_round = contribution.round;
                output.push_str(&format!(
                    "\n{}\n",
                    format!("Round {}", current_round).cyan().bold()
                ));
            }
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", contribution.worker_name).yellow().bold(),
                contribution.content.trim()
            ));
        }

        if let AggregationOutcome::Degraded { reason } = &result.aggregation {
            output.push_str(&format!(
                "\n{} {}\n",
                "Aggregation skipped:".yellow().bold(),
                reason
            ));
        }

        output.push_str(&Self::section_header("Requirements Document"));
        output.push('\n');
        output.push_str(&result.rendered_document);

        if let Some(plan) = execution_plan {
            output.push_str(&Self::section_header("Execution Plan"));
            output.push('\n');
            output.push_str(plan);
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format only the rendered requirements document
    pub fn format_document(result: &SessionResult, execution_plan: Option<&str>) -> String {
        let mut output = result.rendered_document.clone();
        if let Some(plan) = execution_plan {
            if !output.ends_with('\n') {
                output.push('\n');
            }
            output.push('\n');
            output.push_str(plan);
        }
        output
    }

    /// Format as JSON
    pub fn format_json(result: &SessionResult, execution_plan: Option<&ExecutionPlan>) -> String {
        let value = json!({
            "session": result,
            "execution_plan": execution_plan,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn panel(panel: &PanelSpec) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Objective:".cyan().bold(),
            panel.shared_objective()
        ));
        if panel.origin().is_fallback() {
            output.push_str(&format!(
                "{}\n",
                "Using the canonical panel (designer unavailable)".dimmed()
            ));
        }

        output.push_str(&Self::section_header("Panel"));
        for worker in panel.workers() {
            output.push_str(&format!(
                "  {} {}\n",
                worker.name.bold(),
                format!("- {}", worker.persona).dimmed()
            ));
            for focus in &worker.focus {
                output.push_str(&format!("    * {}\n", focus));
            }
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
