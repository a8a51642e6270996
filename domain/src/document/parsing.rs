//! Structured-record extraction from free-form model output.

use serde_json::{Map, Value};

/// Parse a JSON object out of model output text.
///
/// Tries, in order:
/// 1. the whole (trimmed) text as JSON
/// 2. the first ` ```json ` (or bare ` ``` `) fenced block
/// 3. the span from the first `{` to the last `}`
///
/// Returns `None` unless one of them yields a JSON object.
pub fn parse_json_record(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(record) = as_record(trimmed) {
        return Some(record);
    }

    if let Some(block) = fenced_block(trimmed)
        && let Some(record) = as_record(block)
    {
        return Some(record);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    as_record(&trimmed[start..=end])
}

fn as_record(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip the info string (e.g. "json") up to the end of the line
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_json() {
        let record = parse_json_record(r#"{"notes": ["a"]}"#).unwrap();
        assert_eq!(Value::Object(record), json!({"notes": ["a"]}));
    }

    #[test]
    fn test_fenced_json() {
        let text = "Here is the patch:\n```json\n{\"project\": {\"title\": \"X\"}}\n```\nDone.";
        let record = parse_json_record(text).unwrap();
        assert_eq!(record["project"]["title"], json!("X"));
    }

    #[test]
    fn test_embedded_braces() {
        let text = "Sure! {\"constraints\": {\"budget\": 1000}} hope this helps";
        let record = parse_json_record(text).unwrap();
        assert_eq!(record["constraints"]["budget"], json!(1000));
    }

    #[test]
    fn test_non_objects_rejected() {
        assert!(parse_json_record("").is_none());
        assert!(parse_json_record("   ").is_none());
        assert!(parse_json_record("[1, 2, 3]").is_none());
        assert!(parse_json_record("\"just text\"").is_none());
        assert!(parse_json_record("no json here").is_none());
        assert!(parse_json_record("} backwards {").is_none());
        assert!(parse_json_record("{broken: json").is_none());
    }
}
