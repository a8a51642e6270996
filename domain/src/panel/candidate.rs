//! Normalisation of a panel designer's raw proposal.
//!
//! The designer answers with a loosely shaped JSON record:
//!
//! ```json
//! {
//!   "rounds": 3,
//!   "shared_objective": "...",
//!   "agents": [
//!     {"name": "...", "persona": "...", "focus": ["..."], "model_hint": "Claude"}
//!   ]
//! }
//! ```
//!
//! [`normalize_candidate`] turns it into a [`PanelSpec`] or explains why the
//! whole proposal has to be discarded.

use super::entities::{PanelOrigin, PanelSpec, RoundCount, WorkerDescriptor};
use crate::core::model::Model;
use serde_json::Value;
use thiserror::Error;

/// Objective used when the designer does not supply one.
pub const DEFAULT_OBJECTIVE: &str = "Deliver a precise technical requirements plan for the build.";
/// Persona used when a worker has none.
pub const DEFAULT_PERSONA: &str = "Product-minded technical expert.";
/// Focus used when a worker has none.
pub const DEFAULT_FOCUS: &str = "Contribute actionable insights.";

/// Why a designer proposal was discarded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateRejected {
    #[error("panel proposal is not a JSON object")]
    NotAnObject,

    #[error("panel proposal has no usable workers")]
    NoUsableWorkers,
}

/// Normalise a designer proposal into a panel.
///
/// - An explicit `rounds_override` always wins; otherwise the suggested
///   `rounds` is clamped into range (missing or non-numeric → minimum).
/// - Workers without a non-empty `name` are dropped; missing persona or
///   focus fall back to defaults; focus keeps only non-empty strings.
/// - If no worker survives, the proposal is rejected as a whole.
pub fn normalize_candidate(
    candidate: &Value,
    rounds_override: Option<RoundCount>,
) -> Result<PanelSpec, CandidateRejected> {
    let record = candidate
        .as_object()
        .ok_or(CandidateRejected::NotAnObject)?;

    let rounds = rounds_override.unwrap_or_else(|| {
        record
            .get("rounds")
            .and_then(suggested_rounds)
            .map(RoundCount::clamped)
            .unwrap_or_default()
    });

    let shared_objective = record
        .get("shared_objective")
        .and_then(non_empty_str)
        .unwrap_or(DEFAULT_OBJECTIVE);

    let workers: Vec<WorkerDescriptor> = record
        .get("agents")
        .and_then(Value::as_array)
        .map(|agents| agents.iter().filter_map(normalize_worker).collect())
        .unwrap_or_default();

    PanelSpec::new(rounds, shared_objective, workers, PanelOrigin::Designed)
        .map_err(|_| CandidateRejected::NoUsableWorkers)
}

fn normalize_worker(raw: &Value) -> Option<WorkerDescriptor> {
    let name = raw.get("name").and_then(non_empty_str)?;

    let persona = raw
        .get("persona")
        .and_then(non_empty_str)
        .unwrap_or(DEFAULT_PERSONA);

    let mut focus: Vec<String> = raw
        .get("focus")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(non_empty_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if focus.is_empty() {
        focus.push(DEFAULT_FOCUS.to_string());
    }

    let mut worker = WorkerDescriptor::new(name, persona, focus);
    if let Some(hint) = raw.get("model_hint").and_then(non_empty_str) {
        let Ok(model) = hint.parse::<Model>();
        worker = worker.with_model_hint(model);
    }
    Some(worker)
}

fn suggested_rounds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round(n: u8) -> RoundCount {
        RoundCount::new(n).unwrap()
    }

    #[test]
    fn test_full_candidate() {
        let candidate = json!({
            "rounds": 3,
            "shared_objective": "Ship the tech spec.",
            "agents": [
                {"name": "Product Strategist", "persona": "Scope hawk", "focus": ["Metrics"], "model_hint": "Claude"},
                {"name": "Backend Lead", "focus": ["APIs", "", 7]}
            ]
        });

        let panel = normalize_candidate(&candidate, None).unwrap();
        assert_eq!(panel.rounds().get(), 3);
        assert_eq!(panel.shared_objective(), "Ship the tech spec.");
        assert_eq!(panel.origin(), &PanelOrigin::Designed);

        let workers = panel.workers();
        assert_eq!(workers.len(), 2);
        assert_eq!(workers[0].id.as_str(), "product-strategist");
        assert_eq!(workers[0].model_hint, Some(Model::ClaudeSonnet35));
        assert_eq!(workers[1].persona, DEFAULT_PERSONA);
        assert_eq!(workers[1].focus, vec!["APIs".to_string()]);
        assert_eq!(workers[1].model_hint, None);
    }

    #[test]
    fn test_override_always_wins() {
        let candidate = json!({"rounds": 4, "agents": [{"name": "A"}]});
        let panel = normalize_candidate(&candidate, Some(round(2))).unwrap();
        assert_eq!(panel.rounds().get(), 2);
    }

    #[test]
    fn test_suggested_rounds_clamped() {
        let low = json!({"rounds": 1, "agents": [{"name": "A"}]});
        assert_eq!(normalize_candidate(&low, None).unwrap().rounds().get(), 2);

        let high = json!({"rounds": 12, "agents": [{"name": "A"}]});
        assert_eq!(normalize_candidate(&high, None).unwrap().rounds().get(), 4);

        let text = json!({"rounds": "3", "agents": [{"name": "A"}]});
        assert_eq!(normalize_candidate(&text, None).unwrap().rounds().get(), 3);

        let missing = json!({"agents": [{"name": "A"}]});
        assert_eq!(normalize_candidate(&missing, None).unwrap().rounds().get(), 2);
    }

    #[test]
    fn test_defaults_filled() {
        let candidate = json!({"agents": [{"name": "Solo"}]});
        let panel = normalize_candidate(&candidate, None).unwrap();
        assert_eq!(panel.shared_objective(), DEFAULT_OBJECTIVE);
        assert_eq!(panel.workers()[0].focus, vec![DEFAULT_FOCUS.to_string()]);
    }

    #[test]
    fn test_nameless_workers_dropped() {
        let candidate = json!({"agents": [{"persona": "ghost"}, {"name": "   "}, {"name": "Real"}]});
        let panel = normalize_candidate(&candidate, None).unwrap();
        assert_eq!(panel.workers().len(), 1);
        assert_eq!(panel.workers()[0].name, "Real");
    }

    #[test]
    fn test_rejects_when_no_workers_survive() {
        let candidate = json!({"rounds": 3, "agents": [{"persona": "ghost"}]});
        assert_eq!(
            normalize_candidate(&candidate, None).unwrap_err(),
            CandidateRejected::NoUsableWorkers
        );
        assert_eq!(
            normalize_candidate(&json!({"rounds": 3}), None).unwrap_err(),
            CandidateRejected::NoUsableWorkers
        );
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(
            normalize_candidate(&json!(["Product Strategist"]), None).unwrap_err(),
            CandidateRejected::NotAnObject
        );
    }
}
