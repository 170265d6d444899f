use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::types::GenerationRequest;

const GENERATED_FALLBACK_KEYS: &[&str] = &["generated", "result"];
const LOCATOR_FALLBACK_KEYS: &[&str] = &["extracted_xpaths", "extracted"];

/// Record threaded through fetch → extract → generate.
///
/// The request fields sit at the top level next to the two outputs read back
/// from the last stage. Everything else a stage adds (`page_source`, driver
/// handles, ...) survives in `extra` with whatever shape the stage gave it and
/// is sent to the next stage unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    #[serde(flatten)]
    pub request: GenerationRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub xpaths: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowState {
    pub fn from_request(request: GenerationRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }

    /// Generated code, preferring `generated_code`, then `generated`, then `result`.
    /// Empty values are skipped.
    pub fn generated_output(&self) -> Option<String> {
        if let Some(code) = self.generated_code.as_deref().filter(|c| !c.is_empty()) {
            return Some(code.to_string());
        }
        self.first_truthy(GENERATED_FALLBACK_KEYS)
            .map(value_to_text)
    }

    /// Locators, preferring `xpaths`, then `extracted_xpaths`, then `extracted`.
    /// Any non-empty shape is passed through.
    pub fn locator_output(&self) -> Value {
        if is_truthy(&self.xpaths) {
            return self.xpaths.clone();
        }
        self.first_truthy(LOCATOR_FALLBACK_KEYS)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn first_truthy(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.extra.get(*key))
            .find(|value| is_truthy(value))
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Strings pass through as-is; everything else is rendered as JSON text.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
