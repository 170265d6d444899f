use crate::api::types::{GeneratedCode, GenerationRequest, GenerationResponse, LocatorRecord};

const DEFAULT_LANGUAGE: &str = "Java";
const DEFAULT_TOOL: &str = "Selenium";
const DEFAULT_TEST_CASE: &str = "GeneratedTest";
const DEFAULT_URL: &str = "https://example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTemplate {
    Java,
    Python,
    JavaScript,
    Generic,
}

impl CodeTemplate {
    pub fn for_language(language: &str) -> Self {
        match language.to_lowercase().as_str() {
            "java" => CodeTemplate::Java,
            "python" => CodeTemplate::Python,
            "javascript" => CodeTemplate::JavaScript,
            _ => CodeTemplate::Generic,
        }
    }

    pub fn render(&self, tool: &str, test_case: &str, url: &str) -> String {
        match self {
            CodeTemplate::Java => format!(
                "// Auto-generated {tool} test ({test_case})\nimport org.openqa.selenium.WebDriver;\n// Navigate to {url}\n"
            ),
            CodeTemplate::Python => format!(
                "# Auto-generated {tool} test ({test_case})\nfrom selenium import webdriver\n# Navigate to {url}\n"
            ),
            CodeTemplate::JavaScript => format!(
                "// Auto-generated {tool} test ({test_case})\n// Use Playwright or Puppeteer to navigate to {url}\n"
            ),
            CodeTemplate::Generic => {
                format!("// Auto-generated test ({test_case}) for {tool} - navigate to {url}\n")
            }
        }
    }
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default)
}

/// The login-form locators every mock response carries.
pub fn login_form_locators() -> Vec<LocatorRecord> {
    [
        ("input", "username", "username_input"),
        ("input", "password", "password_input"),
        ("button", "login", "login_button"),
    ]
    .into_iter()
    .map(|(tag, value, variable_name)| LocatorRecord {
        tag: tag.to_string(),
        attribute: "id".to_string(),
        value: value.to_string(),
        variable_name: variable_name.to_string(),
        xpath: format!("//{tag}[@id='{value}']"),
    })
    .collect()
}

pub fn mock_code(request: &GenerationRequest) -> String {
    let language = or_default(&request.selected_language, DEFAULT_LANGUAGE);
    let tool = or_default(&request.selected_tool, DEFAULT_TOOL);
    let test_case = or_default(&request.test_case, DEFAULT_TEST_CASE);
    let url = or_default(&request.url, DEFAULT_URL);

    CodeTemplate::for_language(language).render(tool, test_case, url)
}

pub fn mock_response(request: &GenerationRequest) -> Result<GenerationResponse, serde_json::Error> {
    Ok(GenerationResponse::Generated(GeneratedCode {
        generated_code: Some(mock_code(request)),
        extracted_xpaths: serde_json::to_value(login_form_locators())?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            selected_language: language.map(str::to_string),
            ..GenerationRequest::default()
        }
    }

    #[test]
    fn template_selection_is_case_insensitive() {
        assert_eq!(CodeTemplate::for_language("JAVA"), CodeTemplate::Java);
        assert_eq!(CodeTemplate::for_language("Python"), CodeTemplate::Python);
        assert_eq!(CodeTemplate::for_language("JavaScript"), CodeTemplate::JavaScript);
        assert_eq!(CodeTemplate::for_language("javascript"), CodeTemplate::JavaScript);
    }

    #[test]
    fn unknown_languages_get_generic_template() {
        for language in ["C#", "typescript", " java", "", "Ruby"] {
            assert_eq!(CodeTemplate::for_language(language), CodeTemplate::Generic);
        }
    }

    #[test]
    fn defaults_fill_missing_and_empty_fields() {
        let code = mock_code(&GenerationRequest::default());
        assert_eq!(
            code,
            "// Auto-generated Selenium test (GeneratedTest)\nimport org.openqa.selenium.WebDriver;\n// Navigate to https://example.com\n"
        );

        let code = mock_code(&request(None));
        assert!(code.starts_with("// Auto-generated Selenium test (GeneratedTest)\nimport"));
    }

    #[test]
    fn python_template_embeds_case_and_url() {
        let req = GenerationRequest {
            selected_language: Some("Python".into()),
            test_case: Some("Login".into()),
            url: Some("http://x.test".into()),
            ..GenerationRequest::default()
        };
        let code = mock_code(&req);
        assert!(code.starts_with("# Auto-generated Selenium test (Login)"));
        assert!(code.contains("from selenium import webdriver"));
        assert!(code.contains("http://x.test"));
    }

    #[test]
    fn generic_template_mentions_tool_after_case() {
        let req = GenerationRequest {
            selected_language: Some("Kotlin".into()),
            selected_tool: Some("Appium".into()),
            ..GenerationRequest::default()
        };
        assert_eq!(
            mock_code(&req),
            "// Auto-generated test (GeneratedTest) for Appium - navigate to https://example.com\n"
        );
    }

    #[test]
    fn locators_describe_login_form() {
        let locators = login_form_locators();
        assert_eq!(locators.len(), 3);
        assert_eq!(locators[0].xpath, "//input[@id='username']");
        assert_eq!(locators[1].variable_name, "password_input");
        assert_eq!(locators[2].tag, "button");
        assert_eq!(locators[2].xpath, "//button[@id='login']");
    }
}
