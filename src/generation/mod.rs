pub mod mock;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    api::types::{GeneratedCode, GenerationRequest, GenerationResponse},
    manager::WorkflowManager,
    workflow::{
        state::value_to_text, PipelineStages, Stage, Workflow, WorkflowError, WorkflowState,
    },
};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("could not encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serves one request with whatever was resolved at startup: the stage
/// pipeline first, then the single invocation, then the mock generator.
pub async fn generate(
    workflows: &WorkflowManager,
    request: GenerationRequest,
) -> Result<GenerationResponse, GenerationError> {
    if let (Some(stages), Some(_)) = (workflows.stages(), workflows.app()) {
        let state = run_pipeline(stages.as_ref(), request).await?;
        return Ok(GenerationResponse::Generated(GeneratedCode {
            generated_code: state.generated_output(),
            extracted_xpaths: state.locator_output(),
        }));
    }

    if let Some(app) = workflows.app() {
        let result = invoke_workflow(app.as_ref(), &request).await;
        return Ok(coerce_invocation_result(result));
    }

    info!("no workflow available, using mock generator");
    Ok(mock::mock_response(&request)?)
}

/// Runs fetch → extract → generate, handing each stage the previous state.
pub async fn run_pipeline(
    stages: &dyn PipelineStages,
    request: GenerationRequest,
) -> Result<WorkflowState, WorkflowError> {
    let mut state = WorkflowState::from_request(request);
    for stage in Stage::ORDER {
        info!(stage = stage.as_str(), "running workflow stage");
        state = stages.run_stage(stage, state).await?;
    }
    Ok(state)
}

async fn invoke_workflow(app: &dyn Workflow, request: &GenerationRequest) -> Value {
    match app.invoke(request).await {
        Ok(value) => value,
        Err(err) => {
            error!(workflow = app.name(), error = %err, detail = ?err, "workflow invocation failed");
            Value::Null
        }
    }
}

pub fn coerce_invocation_result(result: Value) -> GenerationResponse {
    match result {
        Value::Object(map) => GenerationResponse::Passthrough(map),
        Value::Null => GenerationResponse::Coerced {
            generated_code: None,
        },
        other => GenerationResponse::Coerced {
            generated_code: Some(value_to_text(&other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_results_pass_through() {
        let response = coerce_invocation_result(json!({ "generated_code": "x", "tokens": 10 }));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, json!({ "generated_code": "x", "tokens": 10 }));
    }

    #[test]
    fn scalar_results_become_code_text() {
        let value = serde_json::to_value(coerce_invocation_result(json!("print(1)"))).unwrap();
        assert_eq!(value, json!({ "generated_code": "print(1)" }));

        let value = serde_json::to_value(coerce_invocation_result(json!([1, 2]))).unwrap();
        assert_eq!(value, json!({ "generated_code": "[1,2]" }));
    }

    #[test]
    fn null_result_gives_null_code() {
        let value = serde_json::to_value(coerce_invocation_result(Value::Null)).unwrap();
        assert_eq!(value, json!({ "generated_code": null }));
    }
}
