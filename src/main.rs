use autogen_gateway::{
    api::{self, AppState},
    config::AppConfig,
    init_tracing,
    manager::WorkflowManager,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // -----------------------------
    // Logging
    // -----------------------------
    init_tracing();

    // -----------------------------
    // Config / workflow resolution
    // -----------------------------
    let config = AppConfig::from_env();
    let workflows = WorkflowManager::resolve(&config.workflow);
    let state = AppState::new(workflows);

    // -----------------------------
    // Routers
    // -----------------------------
    let app = api::app(state);

    let addr = config.bind_addr.as_str();
    info!("HTTP listening on http://{addr}");
    info!("health at http://{addr}/health, generation at http://{addr}/generate");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
