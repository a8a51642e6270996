//! Merge engine for the cumulative document.
//!
//! Rules, applied per key of the update:
//!
//! | update value | base value at key | result                                    |
//! |--------------|-------------------|-------------------------------------------|
//! | record       | record            | recurse                                   |
//! | record       | anything else     | update record replaces base               |
//! | list         | list              | `base ++ update`, deduplicated            |
//! | list         | anything else     | update list (deduplicated) replaces base  |
//! | scalar/null  | anything          | update overwrites base                    |
//!
//! Deduplication keeps the first occurrence. Records compare by content
//! (key order irrelevant), lists compare element-wise in order, scalars
//! compare literally (`1` and `"1"` differ).
//!
//! This is not a conflict-free merge: when two updates set the same scalar,
//! the one merged last wins. Callers fix the merge order to keep results
//! reproducible.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Merge `update` into `base` in place.
///
/// Total over all inputs; an empty update is a no-op. Idempotent: merging
/// the same update twice leaves the document as after the first merge.
pub fn merge_into(base: &mut Map<String, Value>, update: &Map<String, Value>) {
    for (key, value) in update {
        match value {
            Value::Object(incoming) => match base.get_mut(key) {
                Some(Value::Object(existing)) => merge_into(existing, incoming),
                _ => {
                    // Replacing records pass through the same rules so that a
                    // second merge of this update finds nothing left to change.
                    let mut fresh = Map::new();
                    merge_into(&mut fresh, incoming);
                    base.insert(key.clone(), Value::Object(fresh));
                }
            },
            Value::Array(incoming) => {
                let merged = match base.get(key) {
                    Some(Value::Array(existing)) => merge_list(existing, incoming),
                    _ => merge_list(&[], incoming),
                };
                base.insert(key.clone(), Value::Array(merged));
            }
            scalar => {
                base.insert(key.clone(), scalar.clone());
            }
        }
    }
}

/// Order-preserving deduplicated union of two lists.
pub fn merge_list(existing: &[Value], incoming: &[Value]) -> Vec<Value> {
    let mut seen = HashSet::new();
    existing
        .iter()
        .chain(incoming)
        .filter(|item| seen.insert(canonical_key(item)))
        .cloned()
        .collect()
}

/// Canonical text form used for equality during deduplication.
///
/// Object keys are emitted in sorted order regardless of how the map
/// stores them; list order is preserved.
pub fn canonical_key(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn merged(base: Value, update: Value) -> Value {
        let mut base = obj(base);
        merge_into(&mut base, &obj(update));
        Value::Object(base)
    }

    #[test]
    fn test_list_union_keeps_first_occurrence_order() {
        let result = merged(
            json!({"product": {"features": ["login", "signup"]}}),
            json!({"product": {"features": ["login"]}}),
        );
        assert_eq!(result, json!({"product": {"features": ["login", "signup"]}}));

        let result = merged(
            json!({"notes": ["b", "a"]}),
            json!({"notes": ["c", "a", "d", "c"]}),
        );
        assert_eq!(result, json!({"notes": ["b", "a", "c", "d"]}));
    }

    #[test]
    fn test_nested_records_recurse() {
        let result = merged(
            json!({"technical": {"security": {"authn": null, "compliance": ["GDPR"]}, "platform": "web"}}),
            json!({"technical": {"security": {"authn": "OIDC", "compliance": ["SOC2"]}}}),
        );
        assert_eq!(
            result,
            json!({"technical": {"security": {"authn": "OIDC", "compliance": ["GDPR", "SOC2"]}, "platform": "web"}})
        );
    }

    #[test]
    fn test_scalar_last_writer_wins() {
        let mut doc = obj(json!({"project": {"title": "Old"}}));
        merge_into(&mut doc, &obj(json!({"project": {"title": "First"}})));
        merge_into(&mut doc, &obj(json!({"project": {"title": "Second"}})));
        assert_eq!(doc["project"]["title"], json!("Second"));
    }

    #[test]
    fn test_null_overwrites() {
        let result = merged(
            json!({"constraints": {"budget": 5000}}),
            json!({"constraints": {"budget": null}}),
        );
        assert_eq!(result, json!({"constraints": {"budget": null}}));
    }

    #[test]
    fn test_type_mismatch_replaces() {
        // record replaces scalar
        let result = merged(
            json!({"project": {"timeline": "Q3"}}),
            json!({"project": {"timeline": {"deadline": "2025-09-30"}}}),
        );
        assert_eq!(result, json!({"project": {"timeline": {"deadline": "2025-09-30"}}}));

        // list replaces record
        let result = merged(json!({"notes": {"a": 1}}), json!({"notes": ["x", "x"]}));
        assert_eq!(result, json!({"notes": ["x"]}));

        // scalar replaces list
        let result = merged(json!({"notes": ["x"]}), json!({"notes": "flat"}));
        assert_eq!(result, json!({"notes": "flat"}));
    }

    #[test]
    fn test_missing_keys_are_created() {
        let result = merged(json!({}), json!({"extra": {"tags": ["a", "a"], "level": 2}}));
        assert_eq!(result, json!({"extra": {"tags": ["a"], "level": 2}}));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let base = json!({"project": {"title": "Same", "goals": ["g"]}});
        assert_eq!(merged(base.clone(), json!({})), base);
    }

    #[test]
    fn test_structural_equality_for_records_in_lists() {
        let result = merged(
            json!({"risks": [{"item": "latency", "mitigation": "cache"}]}),
            json!({"risks": [{"mitigation": "cache", "item": "latency"}, {"item": "cost"}]}),
        );
        assert_eq!(
            result,
            json!({"risks": [{"item": "latency", "mitigation": "cache"}, {"item": "cost"}]})
        );
    }

    #[test]
    fn test_nested_list_order_matters() {
        let result = merged(json!({"grid": [[1, 2]]}), json!({"grid": [[2, 1], [1, 2]]}));
        assert_eq!(result, json!({"grid": [[1, 2], [2, 1]]}));
    }

    #[test]
    fn test_scalars_compare_literally() {
        let result = merged(json!({"tiers": [1, "1", true]}), json!({"tiers": ["true", 1.5, 1]}));
        assert_eq!(result, json!({"tiers": [1, "1", true, "true", 1.5]}));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let bases = [
            json!({}),
            json!({"project": {"title": "T", "goals": ["a", "a"]}, "notes": "scalar"}),
            json!({"product": {"features": ["login", "signup"]}, "technical": {"security": "none"}}),
        ];
        let updates = [
            json!({"product": {"features": ["login", "login", "export"]}}),
            json!({"notes": ["n1", "n1"], "technical": {"security": {"compliance": ["x", "x"]}}}),
            json!({"project": {"title": null, "timeline": {"milestones": [{"m": 1}, {"m": 1}]}}}),
        ];

        for base in &bases {
            for update in &updates {
                let once = merged(base.clone(), update.clone());
                let twice = merged(once.clone(), update.clone());
                assert_eq!(once, twice, "base={base} update={update}");
            }
        }
    }

    #[test]
    fn test_canonical_key_ignores_object_key_order() {
        assert_eq!(
            canonical_key(&json!({"b": 1, "a": [true, null]})),
            canonical_key(&json!({"a": [true, null], "b": 1}))
        );
        assert_ne!(canonical_key(&json!([1, 2])), canonical_key(&json!([2, 1])));
        assert_ne!(canonical_key(&json!(1)), canonical_key(&json!("1")));
    }
}
