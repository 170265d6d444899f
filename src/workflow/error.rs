use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workflow request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("workflow endpoint {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("stage {stage} returned an invalid state: {source}")]
    InvalidState {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode workflow input: {0}")]
    Encode(#[from] serde_json::Error),
}
