//! Project brief domain
//!
//! A brief is the semi-structured record of project facts a planning session
//! starts from. It is usually the cumulative document of an earlier intake
//! conversation, so it shares the document's section names (`project`,
//! `product`, `technical`, ...) but any field may be missing.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary used when a brief carries none of the well-known fields.
pub const EMPTY_BRIEF_SUMMARY: &str = "General greenfield MVP build.";

/// A validated project brief (Value Object)
///
/// Always a non-empty JSON object. Accessors are lenient: a field with the
/// wrong shape is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ProjectBrief {
    fields: Map<String, Value>,
}

impl ProjectBrief {
    /// Create a brief from a JSON value.
    ///
    /// Rejects anything that is not a non-empty JSON object.
    pub fn new(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(fields) if !fields.is_empty() => Ok(Self { fields }),
            Value::Object(_) => Err(DomainError::InvalidBrief("brief is empty".to_string())),
            Value::Null => Err(DomainError::InvalidBrief("brief is missing".to_string())),
            _ => Err(DomainError::InvalidBrief(
                "brief must be a JSON object".to_string(),
            )),
        }
    }

    /// Parse a brief from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::InvalidBrief(format!("not valid JSON: {}", e)))?;
        Self::new(value)
    }

    /// Raw fields of the brief.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The brief as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Look up a string field at `section.key`.
    pub fn text(&self, section: &str, key: &str) -> Option<&str> {
        self.fields
            .get(section)?
            .get(key)?
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Look up a list field at `section.key`, keeping only its scalar items as text.
    pub fn list(&self, section: &str, key: &str) -> Vec<String> {
        let Some(items) = self
            .fields
            .get(section)
            .and_then(|s| s.get(key))
            .and_then(Value::as_array)
        else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Project title, if the brief names one.
    pub fn title(&self) -> Option<&str> {
        self.text("project", "title")
    }

    /// Render the short brief summary shared with every worker.
    ///
    /// One line per known fact (title, summary, goals, key features, stack
    /// hints, AI needs, integrations). Falls back to [`EMPTY_BRIEF_SUMMARY`].
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        if let Some(title) = self.title() {
            lines.push(format!("Title: {}", title));
        }
        if let Some(summary) = self.text("project", "summary") {
            lines.push(format!("Summary: {}", summary));
        }

        let lists = [
            ("Goals", "project", "goals"),
            ("Key Features", "product", "features"),
            ("Stack Hints", "technical", "stack_preferences"),
            ("AI Needs", "technical", "ai_requirements"),
            ("Integrations", "technical", "integrations"),
        ];
        for (label, section, key) in lists {
            let items = self.list(section, key);
            if !items.is_empty() {
                lines.push(format!("{}: {}", label, items.join("; ")));
            }
        }

        if lines.is_empty() {
            EMPTY_BRIEF_SUMMARY.to_string()
        } else {
            lines.join(" \n")
        }
    }
}

impl TryFrom<Value> for ProjectBrief {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectBrief> for Value {
    fn from(brief: ProjectBrief) -> Self {
        Value::Object(brief.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_objects() {
        assert!(ProjectBrief::new(Value::Null).is_err());
        assert!(ProjectBrief::new(json!([])).is_err());
        assert!(ProjectBrief::new(json!("inventory app")).is_err());
        assert!(ProjectBrief::new(json!({})).is_err());
    }

    #[test]
    fn test_summary_collects_known_fields() {
        let brief = ProjectBrief::new(json!({
            "project": {"title": "Inventory Tracker", "goals": ["Track stock", "Alert on low stock"]},
            "product": {"features": ["barcode scan"]},
            "technical": {"stack_preferences": ["Rust", "Postgres"], "integrations": []}
        }))
        .unwrap();

        let summary = brief.summary();
        assert_eq!(
            summary,
            "Title: Inventory Tracker \nGoals: Track stock; Alert on low stock \nKey Features: barcode scan \nStack Hints: Rust; Postgres"
        );
    }

    #[test]
    fn test_summary_falls_back_when_nothing_known() {
        let brief = ProjectBrief::new(json!({"misc": {"color": "blue"}})).unwrap();
        assert_eq!(brief.summary(), EMPTY_BRIEF_SUMMARY);
    }

    #[test]
    fn test_wrong_shapes_are_ignored() {
        let brief = ProjectBrief::new(json!({
            "project": {"title": 42, "goals": "not a list"},
            "product": "oops"
        }))
        .unwrap();
        assert_eq!(brief.title(), None);
        assert!(brief.list("project", "goals").is_empty());
        assert_eq!(brief.summary(), EMPTY_BRIEF_SUMMARY);
    }

    #[test]
    fn test_from_json_str() {
        let brief = ProjectBrief::from_json_str(r#"{"project": {"title": "Inventory Tracker"}}"#)
            .unwrap();
        assert_eq!(brief.title(), Some("Inventory Tracker"));
        assert!(ProjectBrief::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_serde_roundtrip_through_value() {
        let brief = ProjectBrief::new(json!({"project": {"title": "X"}})).unwrap();
        let value = serde_json::to_value(&brief).unwrap();
        assert_eq!(value, json!({"project": {"title": "X"}}));
        let back: ProjectBrief = serde_json::from_value(value).unwrap();
        assert_eq!(back, brief);
    }
}
