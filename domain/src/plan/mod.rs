//! Execution plan domain
//!
//! An execution plan turns the finished requirements document into phases
//! and tasks a delivery team can follow. Plans come back from a reasoning
//! service, so every field is optional on input and tolerant of `null` or
//! non-string scalars.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Overview used when no plan could be drafted.
pub const UNAVAILABLE_OVERVIEW: &str = "High-level plan unavailable.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    #[serde(default, deserialize_with = "lenient_string")]
    pub frontend: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub backend: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub database: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub infrastructure: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ai: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tooling: Vec<String>,
}

impl TechStack {
    /// Labelled, non-empty entries in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Frontend", self.frontend.as_str()),
            ("Backend", self.backend.as_str()),
            ("Database", self.database.as_str()),
            ("Infrastructure", self.infrastructure.as_str()),
            ("AI", self.ai.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty() && self.tooling.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTask {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub details: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub definition_of_done: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanPhase {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub objective: String,
    #[serde(default)]
    pub tasks: Vec<PlanTask>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRisk {
    #[serde(default, deserialize_with = "lenient_string")]
    pub item: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mitigation: String,
}

/// Actionable build plan drafted after a planning session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    #[serde(default, deserialize_with = "lenient_string")]
    pub overview: String,
    #[serde(default)]
    pub tech_stack: TechStack,
    #[serde(default)]
    pub phases: Vec<PlanPhase>,
    #[serde(default)]
    pub risks: Vec<PlanRisk>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub handoff_instructions: Vec<String>,
}

impl Default for ExecutionPlan {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl ExecutionPlan {
    /// Placeholder plan used when drafting fails.
    pub fn unavailable() -> Self {
        Self {
            overview: UNAVAILABLE_OVERVIEW.to_string(),
            tech_stack: TechStack::default(),
            phases: Vec::new(),
            risks: Vec::new(),
            handoff_instructions: Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.overview == UNAVAILABLE_OVERVIEW && self.phases.is_empty()
    }

    /// Interpret a structured record as a plan.
    ///
    /// Returns `None` when the record does not fit the plan shape (e.g.
    /// `phases` is not a list of objects).
    pub fn from_record(record: Map<String, Value>) -> Option<Self> {
        serde_json::from_value(Value::Object(record)).ok()
    }

    /// Empty plan with one example entry per list, used to show the
    /// expected shape in prompts.
    pub fn skeleton() -> Self {
        Self {
            overview: String::new(),
            tech_stack: TechStack::default(),
            phases: vec![PlanPhase {
                tasks: vec![PlanTask::default()],
                ..PlanPhase::default()
            }],
            risks: vec![PlanRisk::default()],
            handoff_instructions: Vec::new(),
        }
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(scalar_text)
            .collect(),
        Value::Null => Vec::new(),
        single => vec![scalar_text(single)],
    })
}
