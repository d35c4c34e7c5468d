//! Extraction of structured JSON from model output

use serde::Serialize;
use serde_json::Value;

use super::prompt::EXPECTED_ITEMS;

pub const INVALID_JSON_MESSAGE: &str = "AI returned invalid JSON";

/// Result of interpreting a model reply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationOutcome {
    /// Parsed JSON, returned verbatim
    Material(Value),
    /// The reply was not JSON; `raw` is the text after fence stripping
    Invalid { error: String, raw: String },
}

/// Remove markdown code fences models add despite being told not to
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a model reply, degrading to a diagnostic payload on failure
pub fn extract_material(raw: &str) -> GenerationOutcome {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => {
            warn_on_unexpected_shape(&value);
            GenerationOutcome::Material(value)
        }
        Err(e) => {
            tracing::warn!("Model output is not valid JSON: {}", e);
            GenerationOutcome::Invalid {
                error: INVALID_JSON_MESSAGE.to_string(),
                raw: cleaned,
            }
        }
    }
}

fn warn_on_unexpected_shape(value: &Value) {
    for key in ["flashcards", "quiz"] {
        let count = value.get(key).and_then(Value::as_array).map(Vec::len);
        if count != Some(EXPECTED_ITEMS) {
            tracing::warn!(
                "Model output has {:?} {} items, expected {}",
                count,
                key,
                EXPECTED_ITEMS
            );
        }
    }
}
