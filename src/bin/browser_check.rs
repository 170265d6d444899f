use anyhow::Result;
use autogen_gateway::{browser, config::AppConfig, init_tracing};
use std::env;
use tracing::info;

/// Starts a headless browser with the service's settings, optionally opens a
/// URL, reports the page title and shuts the browser down again.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let url = env::args().nth(1);
    let config = AppConfig::from_env();

    info!(
        executable = ?config.browser.executable,
        driver_log = %config.browser.driver_log.display(),
        "starting browser check"
    );

    let session = browser::create_chrome_session(&config.browser).await?;

    let visited = match url.as_deref() {
        Some(url) => session.page_title(url).await.map(|title| Some((url, title))),
        None => Ok(None),
    };

    // the session is closed even when the page could not be loaded
    session.close().await?;

    if let Some((url, title)) = visited? {
        info!(%url, %title, "page loaded");
    }
    info!("browser check passed");
    Ok(())
}
