//! Turning a stage's free-text answer into typed data

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

use crate::generator::stages::Stage;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\r?\n?```$").expect("valid fence regex")
});

/// Top-level JSON kind a stage must answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonShape::Object => value.is_object(),
            JsonShape::Array => value.is_array(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            JsonShape::Object => "a JSON object",
            JsonShape::Array => "a JSON array",
        }
    }
}

/// Why a stage's output was rejected
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StageParseError {
    #[error("{stage} stage returned no text")]
    Empty { stage: Stage },

    #[error("{stage} stage output is not valid JSON: {reason}")]
    Syntax { stage: Stage, reason: String },

    #[error("{stage} stage output does not match the expected shape: {reason}")]
    Shape { stage: Stage, reason: String },

    #[error("{stage} stage output failed validation: {reason}")]
    Invalid { stage: Stage, reason: String },
}

impl StageParseError {
    pub fn stage(&self) -> Stage {
        match self {
            StageParseError::Empty { stage }
            | StageParseError::Syntax { stage, .. }
            | StageParseError::Shape { stage, .. }
            | StageParseError::Invalid { stage, .. } => *stage,
        }
    }
}

/// Remove one Markdown code fence wrapped around the whole answer, if present
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

/// Parse `text` as JSON of the given top-level `shape`, then into `T`.
///
/// Never panics; every failure is reported as a [`StageParseError`].
pub fn parse_stage_json<T>(stage: Stage, shape: JsonShape, text: &str) -> Result<T, StageParseError>
where
    T: DeserializeOwned,
{
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(StageParseError::Empty { stage });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| StageParseError::Syntax {
        stage,
        reason: e.to_string(),
    })?;

    if !shape.matches(&value) {
        return Err(StageParseError::Shape {
            stage,
            reason: format!("expected {}", shape.describe()),
        });
    }

    serde_json::from_value(value).map_err(|e| StageParseError::Shape {
        stage,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  [1, 2]  "), "[1, 2]");
        assert_eq!(strip_code_fence("Here you go: ```json [1] ```"), "Here you go: ```json [1] ```");
    }

    #[test]
    fn test_parse_plain_and_fenced() {
        let plain: Vec<Item> =
            parse_stage_json(Stage::Style, JsonShape::Array, r#"[{"name":"A"}]"#).unwrap();
        let fenced: Vec<Item> = parse_stage_json(
            Stage::Style,
            JsonShape::Array,
            "```json\n[{\"name\":\"A\"}]\n```",
        )
        .unwrap();
        assert_eq!(plain, fenced);
    }

    #[test]
    fn test_prose_is_a_syntax_error() {
        let err = parse_stage_json::<Vec<Item>>(
            Stage::Code,
            JsonShape::Array,
            "I understand your request. Could you be more specific?",
        )
        .unwrap_err();
        assert!(matches!(err, StageParseError::Syntax { stage: Stage::Code, .. }));
    }

    #[test]
    fn test_empty_text() {
        let err = parse_stage_json::<Value>(Stage::Structure, JsonShape::Object, "   ").unwrap_err();
        assert_eq!(err, StageParseError::Empty { stage: Stage::Structure });
    }

    #[test]
    fn test_wrong_top_level_kind() {
        let err = parse_stage_json::<Value>(Stage::Structure, JsonShape::Object, "[1,2]").unwrap_err();
        assert!(matches!(err, StageParseError::Shape { .. }));

        let err = parse_stage_json::<Vec<Item>>(Stage::Qa, JsonShape::Array, r#"{"name":"A"}"#)
            .unwrap_err();
        assert!(matches!(err, StageParseError::Shape { .. }));
        assert_eq!(err.stage(), Stage::Qa);
    }

    #[test]
    fn test_missing_required_field_is_shape_error() {
        let err = parse_stage_json::<Vec<Item>>(Stage::Style, JsonShape::Array, r#"[{"title":"A"}]"#)
            .unwrap_err();
        assert!(matches!(err, StageParseError::Shape { .. }));
    }
}
