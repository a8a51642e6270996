//! Cumulative document domain
//!
//! The cumulative document is the shared structured output a panel builds
//! round by round. It starts from a fixed template
//! ([`template::requirements_template`]) and changes only through the merge
//! engine ([`merge::merge_into`]).
//!
//! Worker output reaches the document as a [`DocumentUpdate`], which is
//! validated at construction: only JSON objects are accepted.

pub mod merge;
pub mod parsing;
pub mod template;

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use merge::{canonical_key, merge_into, merge_list};
pub use parsing::parse_json_record;
pub use template::{ShapeDeviation, requirements_template, shape_deviations, template_json};

/// A partial structured update produced by one worker (Value Object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentUpdate {
    fields: Map<String, Value>,
}

impl DocumentUpdate {
    /// An update that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed record.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Validate a JSON value as an update; only objects are accepted.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DomainError::InvalidUpdate(format!(
                "expected a JSON object, found {}",
                template::Shape::of(&other).as_str()
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Template fields whose shape this update would change.
    pub fn deviations(&self) -> Vec<ShapeDeviation> {
        shape_deviations(&self.fields)
    }
}

/// The evolving shared document (Entity)
///
/// Owned by exactly one planning session; mutated only by [`merge`](Self::merge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CumulativeDocument {
    fields: Map<String, Value>,
}

impl Default for CumulativeDocument {
    fn default() -> Self {
        Self::from_template()
    }
}

impl CumulativeDocument {
    /// A fresh document with every template field present and empty.
    pub fn from_template() -> Self {
        Self {
            fields: requirements_template(),
        }
    }

    /// Build a document from a full replacement record (e.g. an aggregation
    /// result), restoring any template field the record omits.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let mut document = Self::from_template();
        merge_into(&mut document.fields, record);
        document
    }

    /// Merge an update into the document in place.
    pub fn merge(&mut self, update: &DocumentUpdate) {
        merge_into(&mut self.fields, &update.fields);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Look up a value by dotted path, e.g. `"project.title"`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Non-empty display text of the value at `path`.
    ///
    /// Strings are returned verbatim, other non-null values as compact JSON.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }

    /// Display text of each item of the list at `path` (empty if not a list).
    pub fn list(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(value: Value) -> DocumentUpdate {
        DocumentUpdate::from_value(value).unwrap()
    }

    #[test]
    fn test_update_rejects_non_objects() {
        assert!(DocumentUpdate::from_value(json!([1])).is_err());
        assert!(DocumentUpdate::from_value(json!("text")).is_err());
        assert!(DocumentUpdate::from_value(Value::Null).is_err());
        assert!(update(json!({})).is_empty());
    }

    #[test]
    fn test_merge_feature_list_without_duplicates() {
        let mut doc = CumulativeDocument::from_template();
        doc.merge(&update(json!({"product": {"features": ["login", "signup"]}})));
        doc.merge(&update(json!({"product": {"features": ["login"]}})));
        assert_eq!(
            doc.get("product.features"),
            Some(&json!(["login", "signup"]))
        );
    }

    #[test]
    fn test_merge_keeps_other_template_fields() {
        let mut doc = CumulativeDocument::from_template();
        doc.merge(&update(json!({"project": {"title": "Inventory Tracker"}})));
        assert_eq!(doc.text("project.title").as_deref(), Some("Inventory Tracker"));
        assert_eq!(doc.get("project.goals"), Some(&json!([])));
        assert_eq!(doc.get("project.timeline.deadline"), Some(&Value::Null));
    }

    #[test]
    fn test_from_record_restores_template_fields() {
        let record = match json!({"project": {"title": "Agg"}, "extra": true}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let doc = CumulativeDocument::from_record(&record);
        assert_eq!(doc.text("project.title").as_deref(), Some("Agg"));
        assert_eq!(doc.get("acceptance.deliverables"), Some(&json!([])));
        assert_eq!(doc.get("extra"), Some(&json!(true)));
    }

    #[test]
    fn test_text_and_list_accessors() {
        let mut doc = CumulativeDocument::from_template();
        doc.merge(&update(json!({
            "constraints": {"budget": 12000, "risks": ["scope", {"item": "latency"}, null]},
            "project": {"summary": "  "}
        })));
        assert_eq!(doc.text("constraints.budget").as_deref(), Some("12000"));
        assert_eq!(doc.text("project.summary"), None);
        assert_eq!(
            doc.text("technical.hosting"),
            Some(r#"{"cloud":null,"region":null}"#.to_string())
        );
        assert_eq!(
            doc.list("constraints.risks"),
            vec!["scope".to_string(), r#"{"item":"latency"}"#.to_string()]
        );
        assert!(doc.list("project.title").is_empty());
        assert!(doc.get("project.title.deeper").is_none());
    }

    #[test]
    fn test_update_deviations() {
        let u = update(json!({"notes": "one note"}));
        let deviations = u.deviations();
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].path, "notes");
    }
}
