use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /generate`. Field names match what the frontend posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_language")]
    pub selected_language: Option<String>,
    #[serde(default = "default_tool")]
    pub selected_tool: Option<String>,
    #[serde(default = "empty_text")]
    pub test_case: Option<String>,
    #[serde(default = "empty_text")]
    pub test_data: Option<String>,
    #[serde(default = "empty_text")]
    pub test_steps: Option<String>,
}

fn default_language() -> Option<String> {
    Some("Java".into())
}

fn default_tool() -> Option<String> {
    Some("Selenium".into())
}

fn empty_text() -> Option<String> {
    Some(String::new())
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            url: None,
            selected_language: default_language(),
            selected_tool: default_tool(),
            test_case: empty_text(),
            test_data: empty_text(),
            test_steps: empty_text(),
        }
    }
}

/// A UI element description the generated test code refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorRecord {
    pub tag: String,
    pub attribute: String,
    pub value: String,
    pub variable_name: String,
    pub xpath: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCode {
    pub generated_code: Option<String>,
    pub extracted_xpaths: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    /// Code plus locators, from the stage pipeline or the mock generator.
    Generated(GeneratedCode),
    /// A non-object invocation result, rendered as text.
    Coerced { generated_code: Option<String> },
    /// An object returned by the workflow invocation, forwarded untouched.
    Passthrough(Map<String, Value>),
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub lang_app_available: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
