use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    api::types::GenerationRequest,
    config::CallStyle,
    workflow::{PipelineStages, Stage, Workflow, WorkflowError, WorkflowState},
};

/// A workflow served over HTTP.
///
/// Stage endpoints are `POST {base}/fetch_page`, `/extract_xpaths` and
/// `/generate_code`, each exchanging the state object. The single invocation
/// goes to `POST {base}/invoke` (structured, `{"input", "config"}` envelope,
/// `output` unwrapped) or straight to `POST {base}` (direct).
#[derive(Clone)]
pub struct RemoteWorkflow {
    client: reqwest::Client,
    base_url: String,
    call_style: CallStyle,
}

impl RemoteWorkflow {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, call_style: CallStyle) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            call_style,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_json<T>(&self, endpoint: String, body: &T) -> Result<Value, WorkflowError>
    where
        T: Serialize + ?Sized + Sync,
    {
        debug!(endpoint = %endpoint, "posting to workflow");

        let response = self
            .client
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(|source| WorkflowError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| WorkflowError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(WorkflowError::Status {
                endpoint,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text)))
    }

    async fn call_stage(
        &self,
        stage: Stage,
        state: WorkflowState,
    ) -> Result<WorkflowState, WorkflowError> {
        let value = self.post_json(self.endpoint(stage.as_str()), &state).await?;
        serde_json::from_value(value).map_err(|source| WorkflowError::InvalidState {
            stage: stage.as_str(),
            source,
        })
    }
}

#[async_trait]
impl PipelineStages for RemoteWorkflow {
    async fn fetch_page(&self, state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        self.call_stage(Stage::FetchPage, state).await
    }

    async fn extract_xpaths(&self, state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        self.call_stage(Stage::ExtractXpaths, state).await
    }

    async fn generate_code(&self, state: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        self.call_stage(Stage::GenerateCode, state).await
    }
}

#[async_trait]
impl Workflow for RemoteWorkflow {
    fn name(&self) -> &str {
        "remote"
    }

    async fn invoke(&self, request: &GenerationRequest) -> Result<Value, WorkflowError> {
        match self.call_style {
            CallStyle::Structured => {
                let envelope = json!({ "input": serde_json::to_value(request)?, "config": {} });
                let value = self.post_json(self.endpoint("invoke"), &envelope).await?;
                Ok(match value {
                    Value::Object(mut map) if map.contains_key("output") => {
                        map.remove("output").unwrap_or(Value::Null)
                    }
                    other => other,
                })
            }
            CallStyle::Direct => self.post_json(self.base_url.clone(), request).await,
        }
    }
}
