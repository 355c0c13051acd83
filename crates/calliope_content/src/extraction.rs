//! JSON extraction and repair for free-form model responses.
//!
//! Model responses often wrap JSON in markdown code blocks or mix it with
//! explanatory text, and the JSON itself frequently carries small defects:
//! stray control characters, bad escapes, trailing commas, truncated arrays.
//! This module locates the embedded JSON, applies a fixed sequence of repair
//! passes, and parses the result into a typed structure.

use calliope_error::{CalliopeResult, ExtractionError, ExtractionErrorKind};
use regex::Regex;
use std::sync::OnceLock;

/// The JSON shape a task expects from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A top-level JSON array
    Array,
    /// A top-level JSON object
    Object,
}

impl Shape {
    fn delimiters(self) -> (char, char) {
        match self {
            Shape::Array => ('[', ']'),
            Shape::Object => ('{', '}'),
        }
    }

    fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            Shape::Array => value.is_array(),
            Shape::Object => value.is_object(),
        }
    }
}

/// Extract a JSON value of the requested shape from a raw model response.
///
/// 1. Fast path: parse the trimmed response directly. Applies when the
///    backend honors a JSON-only response mode.
/// 2. Strip a markdown code fence if present, then take the greedy substring
///    from the first opening delimiter to the last closing one.
/// 3. Apply the repair passes and re-parse.
///
/// # Errors
///
/// `NoJsonFound` when no delimiter of the requested shape exists in the
/// response; `Unrepairable` when a candidate substring was found but still
/// does not parse after repair. Both are recoverable: the orchestrator
/// treats either as a failed backend attempt.
///
/// # Examples
///
/// ```
/// use calliope_content::{Shape, extract_structured};
///
/// let response = "Here you go:\n```json\n[{\"a\": 1},]\n```";
/// let value = extract_structured(response, Shape::Array).unwrap();
/// assert_eq!(value, serde_json::json!([{"a": 1}]));
/// ```
pub fn extract_structured(
    raw: &str,
    shape: Shape,
) -> Result<serde_json::Value, ExtractionError> {
    // Fast path: the whole response is already the JSON we want.
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) {
        if shape.matches(&value) {
            return Ok(value);
        }
    }

    let candidate = strip_code_fence(raw);
    let (open, close) = shape.delimiters();

    let start = candidate.find(open);
    let end = candidate.rfind(close);
    let substring = match (start, end) {
        (Some(start), Some(end)) if start < end => &candidate[start..=end],
        _ => {
            tracing::warn!(
                response_length = raw.len(),
                shape = ?shape,
                "No JSON found in model response"
            );
            return Err(ExtractionError::new(ExtractionErrorKind::NoJsonFound(
                raw.len(),
            )));
        }
    };

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(substring) {
        if shape.matches(&value) {
            return Ok(value);
        }
    }

    let repaired = repair(substring, shape);
    match serde_json::from_str::<serde_json::Value>(&repaired) {
        Ok(value) if shape.matches(&value) => Ok(value),
        _ => {
            tracing::warn!(
                response_length = raw.len(),
                "Model response unparsable after repair"
            );
            Err(ExtractionError::unrepairable(raw))
        }
    }
}

/// Extract and deserialize into a concrete type.
///
/// # Errors
///
/// Extraction errors as in [`extract_structured`]; a value that extracts but
/// does not match `T` is reported as `Unrepairable`.
pub fn extract_typed<T>(raw: &str, shape: Shape) -> CalliopeResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let value = extract_structured(raw, shape)?;
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Extracted JSON does not match the expected structure");
        ExtractionError::unrepairable(raw).into()
    })
}

/// Apply the repair passes, in order: control characters become spaces,
/// stray backslashes are doubled, trailing commas are dropped, comma runs
/// collapse to one, and array shapes are truncated after the last closing
/// bracket.
fn repair(json: &str, shape: Shape) -> String {
    let cleaned = control_chars()
        .replace_all(json, " ")
        .into_owned();
    let cleaned = escape_stray_backslashes(&cleaned);
    let cleaned = trailing_commas()
        .replace_all(&cleaned, "$1")
        .into_owned();
    let mut cleaned = comma_runs().replace_all(&cleaned, ",").into_owned();

    if shape == Shape::Array {
        if let Some(last) = cleaned.rfind(']') {
            cleaned.truncate(last + 1);
        }
    }
    cleaned
}

fn control_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\x00-\x1F\x7F]").expect("Valid control character regex"))
}

fn trailing_commas() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("Valid trailing comma regex"))
}

fn comma_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",+").expect("Valid comma run regex"))
}

/// Double any backslash not starting a valid JSON escape sequence.
fn escape_stray_backslashes(json: &str) -> String {
    const VALID_ESCAPES: [char; 9] = ['"', '\\', '/', 'b', 'f', 'n', 'r', 't', 'u'];

    let mut out = String::with_capacity(json.len());
    let mut chars = json.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some(next) if VALID_ESCAPES.contains(next) => {
                out.push('\\');
                out.push(*next);
                chars.next();
            }
            _ => out.push_str("\\\\"),
        }
    }
    out
}

/// Strip a markdown code fence, returning the inner content.
///
/// Handles ```json fences, bare ``` fences, and fences left unclosed by a
/// truncated response.
fn strip_code_fence(response: &str) -> &str {
    let Some(start) = response.find("```") else {
        return response;
    };
    let content_start = start + 3;
    // Skip a language tag on the opening fence line.
    let content_start = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    match response[content_start..].find("```") {
        Some(end) => response[content_start..content_start + end].trim(),
        // Unclosed fence, likely a truncated response.
        None => response[content_start..].trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn clean_array_parses_on_fast_path() {
        let raw = r#"[{"date": "2025-03-01", "platform": "X"}]"#;
        let value = extract_structured(raw, Shape::Array).unwrap();
        assert_eq!(value[0]["platform"], "X");
    }

    #[test]
    fn clean_object_round_trips_unchanged() {
        let original = serde_json::json!({"tone": "共感的", "keywords": ["HSP", "AI活用"]});
        let raw = serde_json::to_string(&original).unwrap();
        let value = extract_structured(&raw, Shape::Object).unwrap();
        assert_eq!(value, original);
    }

    #[test]
    fn extracts_from_json_code_block() {
        let response = "カレンダーを作成しました。\n\n```json\n[{\"category\": \"HSP共感\"}]\n```\n\n以上です。";
        let value = extract_structured(response, Shape::Array).unwrap();
        assert_eq!(value[0]["category"], "HSP共感");
    }

    #[test]
    fn extracts_object_embedded_in_prose() {
        let response = r#"分析結果です: {"tone": "温かい", "nested": {"depth": 2}} どうぞ。"#;
        let value = extract_structured(response, Shape::Object).unwrap();
        assert_eq!(value["nested"]["depth"], 2);
    }

    #[test]
    fn repairs_trailing_comma() {
        let value = extract_structured(r#"[{"a":1},]"#, Shape::Array).unwrap();
        assert_eq!(value, serde_json::json!([{"a": 1}]));
    }

    #[test]
    fn repairs_comma_runs() {
        let value = extract_structured(r#"[{"a":1},,,{"b":2}]"#, Shape::Array).unwrap();
        assert_eq!(value, serde_json::json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn repairs_control_characters() {
        let raw = "[{\"title\": \"朝の\u{0007}習慣\"}]";
        let value = extract_structured(raw, Shape::Array).unwrap();
        assert_eq!(value[0]["title"], "朝の 習慣");
    }

    #[test]
    fn repairs_stray_backslash() {
        // \q is not a valid JSON escape; a literal backslash was intended.
        let raw = r#"[{"path": "C:\qdata"}]"#;
        let value = extract_structured(raw, Shape::Array).unwrap();
        assert_eq!(value[0]["path"], r"C:\qdata");
    }

    #[test]
    fn keeps_valid_escapes_intact() {
        let raw = r#"[{"text": "line1\nline2 \"quoted\""}]"#;
        let value = extract_structured(raw, Shape::Array).unwrap();
        assert_eq!(value[0]["text"], "line1\nline2 \"quoted\"");
    }

    #[test]
    fn truncates_garbage_after_array() {
        let raw = "[{\"a\":1}] and then the model kept talking";
        let value = extract_structured(raw, Shape::Array).unwrap();
        assert_eq!(value, serde_json::json!([{"a": 1}]));
    }

    #[test]
    fn no_json_found_reports_length() {
        let err = extract_structured("ただのテキストです", Shape::Array).unwrap_err();
        assert!(matches!(err.kind, ExtractionErrorKind::NoJsonFound(_)));
    }

    #[test]
    fn unrepairable_carries_original() {
        let raw = r#"[{"a": }]"#;
        let err = extract_structured(raw, Shape::Array).unwrap_err();
        match err.kind {
            ExtractionErrorKind::Unrepairable { original, .. } => assert_eq!(original, raw),
            other => panic!("expected Unrepairable, got {:?}", other),
        }
    }

    #[test]
    fn shape_mismatch_is_not_accepted() {
        // An object response when an array was requested.
        let err = extract_structured(r#"{"a": 1}"#, Shape::Array).unwrap_err();
        assert!(matches!(err.kind, ExtractionErrorKind::NoJsonFound(_)));
    }

    #[test]
    fn unclosed_fence_still_extracts() {
        let response = "```json\n[{\"a\": 1}]";
        let value = extract_structured(response, Shape::Array).unwrap();
        assert_eq!(value, serde_json::json!([{"a": 1}]));
    }

    #[test]
    fn typed_extraction_deserializes() {
        #[derive(Debug, Deserialize)]
        struct Draft {
            content: String,
            hashtags: Vec<String>,
        }

        let raw = r##"[{"content": "おはよう", "hashtags": ["#HSP"]}]"##;
        let drafts: Vec<Draft> = extract_typed(raw, Shape::Array).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].content, "おはよう");
        assert_eq!(drafts[0].hashtags, vec!["#HSP"]);
    }

    #[test]
    fn typed_extraction_rejects_wrong_structure() {
        #[derive(Debug, Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            count: u32,
        }

        let result: CalliopeResult<Strict> =
            extract_typed(r#"{"count": "not a number"}"#, Shape::Object);
        assert!(result.is_err());
    }
}
