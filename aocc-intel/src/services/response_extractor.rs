//! Response Extractor
//!
//! Recovers a JSON value from raw generator output that may be wrapped in
//! prose, markdown fences, or carry trailing commas.
//!
//! Strategies run in a fixed order and the first one that parses wins:
//! 1. direct parse of the (fence-stripped) text
//! 2. `[` immediately followed by `{` up to the last `]`, with one
//!    trailing-comma repair attempt
//! 3. first `[` to last `]`
//! 4. first `{` to last `}`
//!
//! Nothing here returns an error: failure means "no usable data".

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?([\s\S]*?)```").expect("static regex"));
static ARRAY_OF_OBJECTS_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*\{").expect("static regex"));
static TRAILING_COMMA_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*]").expect("static regex"));
static TRAILING_COMMA_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*}").expect("static regex"));

type Strategy = fn(&str) -> Option<Value>;

const STRATEGIES: [(&str, Strategy); 4] = [
    ("direct", parse_direct),
    ("array_of_objects", parse_array_of_objects),
    ("bracket_span", parse_bracket_span),
    ("brace_span", parse_brace_span),
];

/// Extract a JSON value from generator text
///
/// Returns `None` for empty input or when no strategy recovers a value.
pub fn extract_json(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    let working = strip_fence(text);

    for (name, strategy) in STRATEGIES {
        if let Some(value) = strategy(working) {
            tracing::debug!(strategy = name, "Recovered JSON from generator output");
            return Some(value);
        }
        tracing::debug!(strategy = name, "Extraction strategy did not match");
    }

    tracing::warn!(
        text_len = text.len(),
        preview = %preview(text),
        "Failed to recover JSON from generator output"
    );
    None
}

/// Extract the list of items carried by a response
///
/// An array is returned as-is; for an object, the first field (in document
/// order) holding an array is used. Anything else yields an empty list.
pub fn extract_array(text: &str) -> Vec<Value> {
    match extract_json(text) {
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => map
            .into_iter()
            .find_map(|(key, value)| match value {
                Value::Array(items) => {
                    tracing::debug!(field = %key, "Using array field of response object");
                    Some(items)
                }
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Interior of the first fenced block (trimmed), or the whole text
fn strip_fence(text: &str) -> &str {
    FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(text)
}

fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn parse_array_of_objects(text: &str) -> Option<Value> {
    let start = ARRAY_OF_OBJECTS_START.find(text)?.start();
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }

    let candidate = &text[start..=end];
    if let Ok(value) = serde_json::from_str(candidate) {
        return Some(value);
    }

    let repaired = remove_trailing_commas(candidate);
    let value = serde_json::from_str(&repaired).ok();
    if value.is_none() {
        tracing::debug!("Trailing comma repair did not produce valid JSON");
    }
    value
}

fn parse_bracket_span(text: &str) -> Option<Value> {
    span(text, '[', ']')
}

fn parse_brace_span(text: &str) -> Option<Value> {
    span(text, '{', '}')
}

fn span(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Single repair pass: drop commas directly before `]` or `}`
fn remove_trailing_commas(text: &str) -> String {
    let pass = TRAILING_COMMA_ARRAY.replace_all(text, "]");
    TRAILING_COMMA_OBJECT.replace_all(&pass, "}").into_owned()
}

fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_json(""), None);
        assert_eq!(extract_json("   \n"), None);
    }

    #[test]
    fn test_valid_json_matches_direct_parse() {
        for input in [
            r#"{"a": 1, "b": [true, null]}"#,
            r#"[{"title": "x"}, {"title": "y"}]"#,
            "42",
            r#""plain string""#,
        ] {
            let expected: Value = serde_json::from_str(input).unwrap();
            assert_eq!(extract_json(input), Some(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_fenced_json() {
        let inner = r#"{"predictedValue": 180000, "appliedScenario": "Normal Operations"}"#;
        let text = format!("Here you go:\n```json\n{}\n```\nThanks", inner);
        let expected: Value = serde_json::from_str(inner).unwrap();
        assert_eq!(extract_json(&text), Some(expected));
    }

    #[test]
    fn test_untagged_fence() {
        let text = "```\n[{\"a\": 1}]\n```";
        assert_eq!(extract_json(text), Some(json!([{"a": 1}])));
    }

    #[test]
    fn test_prose_around_array() {
        let text = r#"Here is the data: [{"a":1}] - hope this helps"#;
        assert_eq!(extract_json(text), Some(json!([{"a": 1}])));
    }

    #[test]
    fn test_prose_brackets_before_array_are_skipped() {
        let text = r#"See the [recommended] policy: [ {"a": 1}, {"a": 2} ]"#;
        assert_eq!(extract_json(text), Some(json!([{"a": 1}, {"a": 2}])));
    }

    #[test]
    fn test_trailing_comma_repaired() {
        assert_eq!(extract_json(r#"[{"a":1},]"#), Some(json!([{"a": 1}])));
        assert_eq!(
            extract_json(r#"Result: [{"a": 1, "b": [1, 2,],},]"#),
            Some(json!([{"a": 1, "b": [1, 2]}]))
        );
    }

    #[test]
    fn test_object_in_prose() {
        let text = r#"The answer is {"predictedValue": 5} as requested."#;
        assert_eq!(extract_json(text), Some(json!({"predictedValue": 5})));
    }

    #[test]
    fn test_unrecoverable_text() {
        assert_eq!(extract_json("no structure here at all"), None);
        assert_eq!(extract_json("broken [{ \"a\": }"), None);
        assert_eq!(extract_json("} reversed {"), None);
    }

    #[test]
    fn test_extract_array_from_wrapper_object() {
        let text = r#"{"status": "ok", "events": [{"title": "A"}], "other": [1]}"#;
        assert_eq!(extract_array(text), vec![json!({"title": "A"})]);
    }

    #[test]
    fn test_extract_array_without_array() {
        assert!(extract_array(r#"{"status": "ok"}"#).is_empty());
        assert!(extract_array("nothing").is_empty());
    }
}
