pub mod error;
pub mod remote;
pub mod state;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::types::GenerationRequest;

pub use error::WorkflowError;
pub use remote::RemoteWorkflow;
pub use state::WorkflowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchPage,
    ExtractXpaths,
    GenerateCode,
}

impl Stage {
    /// Execution order of the direct pipeline.
    pub const ORDER: [Stage; 3] = [Stage::FetchPage, Stage::ExtractXpaths, Stage::GenerateCode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FetchPage => "fetch_page",
            Stage::ExtractXpaths => "extract_xpaths",
            Stage::GenerateCode => "generate_code",
        }
    }
}

/// The three stage functions of a workflow, each taking and returning the state.
#[async_trait]
pub trait PipelineStages: Send + Sync {
    async fn fetch_page(&self, state: WorkflowState) -> Result<WorkflowState, WorkflowError>;
    async fn extract_xpaths(&self, state: WorkflowState) -> Result<WorkflowState, WorkflowError>;
    async fn generate_code(&self, state: WorkflowState) -> Result<WorkflowState, WorkflowError>;

    async fn run_stage(
        &self,
        stage: Stage,
        state: WorkflowState,
    ) -> Result<WorkflowState, WorkflowError> {
        match stage {
            Stage::FetchPage => self.fetch_page(state).await,
            Stage::ExtractXpaths => self.extract_xpaths(state).await,
            Stage::GenerateCode => self.generate_code(state).await,
        }
    }
}

/// Whole-workflow invocation: one request in, one arbitrary JSON result out.
#[async_trait]
pub trait Workflow: Send + Sync {
    fn name(&self) -> &str;

    async fn invoke(&self, request: &GenerationRequest) -> Result<Value, WorkflowError>;
}
