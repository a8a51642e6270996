//! Fixed template of the cumulative requirements document.

use serde_json::{Map, Value, json};

/// Top-level sections of the template, in rendering order.
pub const SECTIONS: [&str; 6] = [
    "project",
    "product",
    "technical",
    "constraints",
    "acceptance",
    "notes",
];

/// The empty requirements template: scalars null, lists empty.
pub fn requirements_template() -> Map<String, Value> {
    let template = json!({
        "project": {
            "title": null,
            "summary": null,
            "goals": [],
            "non_goals": [],
            "stakeholders": [],
            "timeline": {"start": null, "milestones": [], "deadline": null}
        },
        "product": {
            "target_users": [],
            "personas": [],
            "features": [],
            "user_journeys": [],
            "ux_notes": []
        },
        "technical": {
            "platform": null,
            "stack_preferences": [],
            "integrations": [],
            "data_model_hints": [],
            "ai_requirements": [],
            "security": {"authn": null, "authz": null, "compliance": []},
            "scalability": {"traffic_tiers": [], "SLOs": []},
            "hosting": {"cloud": null, "region": null}
        },
        "constraints": {
            "budget": null,
            "team": {"size": null, "roles": []},
            "dependencies": [],
            "risks": []
        },
        "acceptance": {
            "success_metrics": [],
            "acceptance_criteria": [],
            "deliverables": []
        },
        "notes": []
    });

    match template {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// The template as compact JSON, embedded in extraction prompts.
pub fn template_json() -> String {
    Value::Object(requirements_template()).to_string()
}

/// Shape of a value as far as the template is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Record,
    List,
    Scalar,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Shape::Record,
            Value::Array(_) => Shape::List,
            _ => Shape::Scalar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Record => "record",
            Shape::List => "list",
            Shape::Scalar => "scalar",
        }
    }
}

/// A place where an update disagrees with the template's shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDeviation {
    /// Dotted path, e.g. `technical.security`
    pub path: String,
    pub expected: Shape,
    pub found: Shape,
}

impl std::fmt::Display for ShapeDeviation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.path,
            self.expected.as_str(),
            self.found.as_str()
        )
    }
}

/// Report every template field whose shape an update would change.
///
/// Keys unknown to the template are allowed and not reported.
pub fn shape_deviations(update: &Map<String, Value>) -> Vec<ShapeDeviation> {
    let mut deviations = Vec::new();
    collect_deviations(&requirements_template(), update, "", &mut deviations);
    deviations
}

fn collect_deviations(
    template: &Map<String, Value>,
    update: &Map<String, Value>,
    prefix: &str,
    out: &mut Vec<ShapeDeviation>,
) {
    for (key, value) in update {
        let Some(expected_value) = template.get(key) else {
            continue;
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        let expected = Shape::of(expected_value);
        let found = Shape::of(value);
        if expected != found {
            out.push(ShapeDeviation {
                path,
                expected,
                found,
            });
            continue;
        }

        if let (Value::Object(t), Value::Object(u)) = (expected_value, value) {
            collect_deviations(t, u, &path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_sections() {
        let template = requirements_template();
        for section in SECTIONS {
            assert!(template.contains_key(section), "missing {section}");
        }
        assert_eq!(template.len(), SECTIONS.len());
        assert_eq!(template["technical"]["scalability"]["SLOs"], json!([]));
        assert_eq!(template["project"]["title"], Value::Null);
    }

    #[test]
    fn test_template_json_is_compact() {
        let text = template_json();
        assert!(text.starts_with('{'));
        assert!(!text.contains('\n'));
        assert!(text.contains("\"acceptance_criteria\":[]"));
    }

    #[test]
    fn test_shape_deviations() {
        let update = match json!({
            "project": {"title": "ok", "goals": "should be a list"},
            "technical": {"security": ["wrong"], "hosting": {"cloud": "aws"}},
            "custom": {"anything": 1}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let deviations = shape_deviations(&update);
        let paths: Vec<_> = deviations.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["project.goals", "technical.security"]);
        assert_eq!(
            deviations[1].to_string(),
            "technical.security: expected record, found list"
        );
    }
}
