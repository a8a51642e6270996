//! Markdown rendering of the requirements document

use planner_application::DocumentRenderer;
use planner_domain::{CumulativeDocument, DiscussionHistory, single_line, truncate};
use serde_json::Value;

/// Contributions quoted in the debate summary.
const DEBATE_SUMMARY_LEN: usize = 5;
const QUOTE_MAX_LEN: usize = 240;

/// Renders the cumulative document as a "Software Requirements Document"
pub struct MarkdownDocumentRenderer;

impl MarkdownDocumentRenderer {
    fn section(output: &mut String, title: &str) {
        output.push_str(&format!("\n---\n\n## {}\n\n", title));
    }

    fn bullets(output: &mut String, label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("**{}:**\n", label));
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');
    }

    fn field(output: &mut String, label: &str, value: Option<String>) {
        if let Some(value) = value {
            output.push_str(&format!("**{}:** {}\n\n", label, value));
        }
    }

    /// One-line digest of a nested record such as `project.timeline`.
    ///
    /// Empty members are skipped; `None` when nothing is left.
    fn digest(document: &CumulativeDocument, path: &str) -> Option<String> {
        let Some(Value::Object(record)) = document.get(path) else {
            return document.text(path);
        };

        let parts: Vec<String> = record
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) if s.trim().is_empty() => return None,
                    Value::String(s) => s.clone(),
                    Value::Array(items) if items.is_empty() => return None,
                    Value::Array(items) => items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("; "),
                    Value::Object(map) if map.is_empty() => return None,
                    other => other.to_string(),
                };
                Some(format!("{}: {}", key, text))
            })
            .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }

    fn debate_summary(output: &mut String, history: &DiscussionHistory) {
        if history.is_empty() {
            return;
        }
        Self::section(output, "Debate Summary");
        for contribution in history.recent(DEBATE_SUMMARY_LEN) {
            output.push_str(&format!(
                "- **{}** (round {}): {}\n",
                contribution.worker_name,
                contribution.round,
                truncate(&single_line(&contribution.content), QUOTE_MAX_LEN)
            ));
        }
    }
}

impl DocumentRenderer for MarkdownDocumentRenderer {
    fn render(&self, document: &CumulativeDocument, history: &DiscussionHistory) -> String {
        let mut md = String::from("# Software Requirements Document\n");
        Self::debate_summary(&mut md, history);

        Self::section(&mut md, "Project Overview");
        md.push_str(&format!(
            "**Title:** {}\n\n",
            document.text("project.title").unwrap_or_default()
        ));
        md.push_str(&format!(
            "**Summary:** {}\n\n",
            document.text("project.summary").unwrap_or_default()
        ));
        Self::bullets(&mut md, "Goals", &document.list("project.goals"));
        Self::bullets(&mut md, "Non-Goals", &document.list("project.non_goals"));
        Self::bullets(&mut md, "Stakeholders", &document.list("project.stakeholders"));
        Self::field(&mut md, "Timeline", Self::digest(document, "project.timeline"));

        Self::section(&mut md, "Product");
        Self::bullets(&mut md, "Target Users", &document.list("product.target_users"));
        Self::bullets(&mut md, "Personas", &document.list("product.personas"));
        Self::bullets(&mut md, "Key Features", &document.list("product.features"));
        Self::bullets(&mut md, "User Journeys", &document.list("product.user_journeys"));
        Self::bullets(&mut md, "UX Notes", &document.list("product.ux_notes"));

        Self::section(&mut md, "Technical");
        Self::field(&mut md, "Platform", document.text("technical.platform"));
        Self::bullets(
            &mut md,
            "Stack Preferences",
            &document.list("technical.stack_preferences"),
        );
        Self::bullets(&mut md, "Integrations", &document.list("technical.integrations"));
        Self::bullets(
            &mut md,
            "Data Model Hints",
            &document.list("technical.data_model_hints"),
        );
        Self::bullets(
            &mut md,
            "AI Requirements",
            &document.list("technical.ai_requirements"),
        );
        Self::field(&mut md, "Security", Self::digest(document, "technical.security"));
        Self::field(
            &mut md,
            "Scalability & SLOs",
            Self::digest(document, "technical.scalability"),
        );
        Self::field(&mut md, "Hosting", Self::digest(document, "technical.hosting"));

        Self::section(&mut md, "Constraints");
        Self::field(&mut md, "Budget", document.text("constraints.budget"));
        Self::field(&mut md, "Team", Self::digest(document, "constraints.team"));
        Self::bullets(&mut md, "Dependencies", &document.list("constraints.dependencies"));
        Self::bullets(&mut md, "Risks", &document.list("constraints.risks"));

        Self::section(&mut md, "Acceptance & Deliverables");
        Self::bullets(
            &mut md,
            "Success Metrics",
            &document.list("acceptance.success_metrics"),
        );
        Self::bullets(
            &mut md,
            "Acceptance Criteria",
            &document.list("acceptance.acceptance_criteria"),
        );
        Self::bullets(&mut md, "Deliverables", &document.list("acceptance.deliverables"));

        let notes = document.list("notes");
        if !notes.is_empty() {
            Self::section(&mut md, "Notes");
            for note in notes {
                md.push_str(&format!("- {}\n", note));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_domain::{Contribution, DocumentUpdate, WorkerId};
    use serde_json::json;

    fn document(update: Value) -> CumulativeDocument {
        let mut document = CumulativeDocument::from_template();
        document.merge(&DocumentUpdate::from_value(update).unwrap());
        document
    }

    #[test]
    fn test_template_renders_headings_only() {
        let md = MarkdownDocumentRenderer
            .render(&CumulativeDocument::from_template(), &DiscussionHistory::new());

        assert!(md.starts_with("# Software Requirements Document\n"));
        assert!(md.contains("## Project Overview"));
        assert!(md.contains("## Acceptance & Deliverables"));
        assert!(md.contains("**Title:** \n"));
        assert!(!md.contains("Debate Summary"));
        assert!(!md.contains("**Goals:**"));
        assert!(!md.contains("**Timeline:**"));
        assert!(!md.contains("## Notes"));
    }

    #[test]
    fn test_populated_fields() {
        let document = document(json!({
            "project": {
                "title": "Inventory Tracker",
                "goals": ["Track stock"],
                "timeline": {"deadline": "Q3", "milestones": ["MVP", "Beta"]}
            },
            "technical": {"security": {"authn": "OIDC", "compliance": []}},
            "constraints": {"budget": 50000},
            "notes": ["Mobile later"]
        }));

        let md = MarkdownDocumentRenderer.render(&document, &DiscussionHistory::new());

        assert!(md.contains("**Title:** Inventory Tracker"));
        assert!(md.contains("**Goals:**\n- Track stock\n"));
        assert!(md.contains("**Timeline:** deadline: Q3, milestones: MVP; Beta"));
        assert!(md.contains("**Security:** authn: OIDC\n"));
        assert!(md.contains("**Budget:** 50000"));
        assert!(md.contains("## Notes\n\n- Mobile later\n"));
    }

    #[test]
    fn test_debate_summary_keeps_last_five() {
        let mut history = DiscussionHistory::new();
        for i in 1..=7 {
            history.push(Contribution::new(
                WorkerId::new(format!("w{i}")),
                format!("Worker {i}"),
                format!("point\n{i}"),
                1,
            ));
        }

        let md = MarkdownDocumentRenderer.render(&CumulativeDocument::from_template(), &history);

        assert!(md.contains("## Debate Summary"));
        assert!(!md.contains("**Worker 2**"));
        assert!(md.contains("- **Worker 3** (round 1): point 3\n"));
        assert!(md.contains("**Worker 7**"));
    }
}
