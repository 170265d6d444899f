use axum::{extract::State, Json};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    api::{
        error::ApiError,
        types::{GenerationRequest, GenerationResponse, HealthResponse},
        AppState,
    },
    generation,
};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        lang_app_available: state.workflows.lang_app_available(),
    })
}

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!(
        "generate",
        request_id = %request_id,
        mode = state.workflows.mode().as_str()
    );

    async move {
        info!(
            language = req.selected_language.as_deref().unwrap_or_default(),
            tool = req.selected_tool.as_deref().unwrap_or_default(),
            "generation requested"
        );
        let response = generation::generate(&state.workflows, req).await?;
        Ok::<_, ApiError>(Json(response))
    }
    .instrument(span)
    .await
}
