use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::{WorkflowBackend, WorkflowConfig},
    workflow::{PipelineStages, RemoteWorkflow, Workflow},
};

/// Why a configured backend could not be resolved. The service then runs in
/// mock mode.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("WORKFLOW_URL is not set")]
    MissingUrl,
    #[error("invalid WORKFLOW_URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Workflow implementations resolved once at startup and shared read-only.
#[derive(Clone, Default)]
pub struct WorkflowManager {
    stages: Option<Arc<dyn PipelineStages>>,
    app: Option<Arc<dyn Workflow>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Pipeline,
    Invoke,
    Mock,
}

impl DispatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchMode::Pipeline => "pipeline",
            DispatchMode::Invoke => "invoke",
            DispatchMode::Mock => "mock",
        }
    }
}

impl WorkflowManager {
    /// Nothing resolved: every request is served by the mock generator.
    pub fn mock() -> Self {
        Self::default()
    }

    pub fn with_workflow(app: Arc<dyn Workflow>) -> Self {
        Self {
            stages: None,
            app: Some(app),
        }
    }

    /// Stage functions always come together with the workflow they belong to.
    pub fn with_pipeline(stages: Arc<dyn PipelineStages>, app: Arc<dyn Workflow>) -> Self {
        Self {
            stages: Some(stages),
            app: Some(app),
        }
    }

    /// Looks the configured backend up in the registry. Failures are logged
    /// and degrade to mock mode; they never stop the server.
    pub fn resolve(config: &WorkflowConfig) -> Self {
        let manager = match config.backend {
            WorkflowBackend::None => Self::mock(),
            WorkflowBackend::Remote => Self::resolve_remote(config).unwrap_or_else(|err| {
                warn!(backend = config.backend.as_str(), error = %err, "could not resolve workflow, using mock generator");
                Self::mock()
            }),
        };

        info!(
            backend = config.backend.as_str(),
            mode = manager.mode().as_str(),
            lang_app_available = manager.lang_app_available(),
            "workflow resolved"
        );
        manager
    }

    fn resolve_remote(config: &WorkflowConfig) -> Result<Self, ResolveError> {
        let url = config.url.as_deref().ok_or(ResolveError::MissingUrl)?;
        url::Url::parse(url).map_err(|source| ResolveError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(ResolveError::Client)?;
        let remote = Arc::new(RemoteWorkflow::new(client, url, config.call_style));

        Ok(if config.pipeline {
            Self::with_pipeline(remote.clone(), remote)
        } else {
            Self::with_workflow(remote)
        })
    }

    pub fn stages(&self) -> Option<&Arc<dyn PipelineStages>> {
        self.stages.as_ref()
    }

    pub fn app(&self) -> Option<&Arc<dyn Workflow>> {
        self.app.as_ref()
    }

    pub fn lang_app_available(&self) -> bool {
        self.app.is_some()
    }

    pub fn mode(&self) -> DispatchMode {
        match (&self.stages, &self.app) {
            (Some(_), Some(_)) => DispatchMode::Pipeline,
            (_, Some(_)) => DispatchMode::Invoke,
            _ => DispatchMode::Mock,
        }
    }
}
