use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DRIVER_LOG: &str = "/tmp/chromedriver.log";

/// Which workflow implementation the registry hands out at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowBackend {
    None,
    Remote,
}

impl WorkflowBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "mock" => Some(Self::None),
            "remote" | "http" => Some(Self::Remote),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowBackend::None => "none",
            WorkflowBackend::Remote => "remote",
        }
    }
}

/// Calling convention of the remote workflow's single invocation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// `POST {base}/invoke` with `{"input": ..., "config": {}}`.
    Structured,
    /// `POST {base}` with the request object as body.
    Direct,
}

impl CallStyle {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "structured" | "invoke" => Some(Self::Structured),
            "direct" | "call" => Some(Self::Direct),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub backend: WorkflowBackend,
    pub url: Option<String>,
    pub pipeline: bool,
    pub call_style: CallStyle,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            backend: WorkflowBackend::None,
            url: None,
            pipeline: false,
            call_style: CallStyle::Structured,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub executable: Option<PathBuf>,
    pub driver_log: PathBuf,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            driver_log: PathBuf::from(DEFAULT_DRIVER_LOG),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub workflow: WorkflowConfig,
    pub browser: BrowserSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            workflow: WorkflowConfig::default(),
            browser: BrowserSettings::default(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.bind_addr);

        let backend = match lookup("WORKFLOW_BACKEND") {
            Some(raw) => WorkflowBackend::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown WORKFLOW_BACKEND, using mock generator");
                WorkflowBackend::None
            }),
            None => defaults.workflow.backend,
        };

        let call_style = match lookup("WORKFLOW_CALL_STYLE") {
            Some(raw) => CallStyle::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "unknown WORKFLOW_CALL_STYLE, using structured");
                CallStyle::Structured
            }),
            None => defaults.workflow.call_style,
        };

        let pipeline = lookup("WORKFLOW_PIPELINE")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.workflow.pipeline);

        let url = lookup("WORKFLOW_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let executable = lookup("CHROME_EXECUTABLE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let driver_log = lookup("CHROMEDRIVER_LOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.browser.driver_log);

        Self {
            bind_addr,
            workflow: WorkflowConfig {
                backend,
                url,
                pipeline,
                call_style,
            },
            browser: BrowserSettings {
                executable,
                driver_log,
            },
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
