//! Headless Chromium sessions for workflow stages that need a live page.
//!
//! Nothing on the request path calls into this module. The caller owns the
//! returned session and is responsible for closing it.

use std::path::Path;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures_util::StreamExt;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::BrowserSettings;

pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser config error: {0}")]
    Config(String),
    #[error("failed to launch chromium: {0}")]
    Launch(#[source] CdpError),
    #[error("failed to load page: {0}")]
    Page(#[source] CdpError),
    #[error("failed to close chromium: {0}")]
    Close(#[source] CdpError),
}

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Opens `url` in a new tab and returns the document title.
    pub async fn page_title(&self, url: &str) -> Result<String, BrowserError> {
        let page = self.browser.new_page(url).await.map_err(BrowserError::Page)?;
        let title = page.get_title().await.map_err(BrowserError::Page)?;
        Ok(title.unwrap_or_default())
    }

    pub async fn close(mut self) -> Result<(), BrowserError> {
        self.browser.close().await.map_err(BrowserError::Close)?;
        if let Err(err) = self.browser.wait().await {
            debug!(error = %err, "waiting for chromium exit failed");
        }
        self.handler.abort();
        Ok(())
    }
}

/// Switches passed on top of headless mode, disabled sandbox and the fixed window size.
pub fn chrome_args(driver_log: &Path) -> Vec<String> {
    vec![
        "--disable-dev-shm-usage".to_string(),
        "--disable-gpu".to_string(),
        "--enable-logging".to_string(),
        "--v=1".to_string(),
        format!("--log-file={}", driver_log.display()),
    ]
}

pub fn browser_config(settings: &BrowserSettings) -> Result<BrowserConfig, BrowserError> {
    let mut builder = BrowserConfig::builder()
        .new_headless_mode()
        .no_sandbox()
        .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .args(chrome_args(&settings.driver_log));

    if let Some(executable) = &settings.executable {
        builder = builder.chrome_executable(executable);
    }

    builder.build().map_err(BrowserError::Config)
}

/// Launches a headless browser. On failure the driver log is dumped to the
/// error log before the error is returned.
pub async fn create_chrome_session(settings: &BrowserSettings) -> Result<BrowserSession, BrowserError> {
    let result = launch(settings).await;
    if let Err(err) = &result {
        error!(
            error = %err,
            log_path = %settings.driver_log.display(),
            "failed to start chromium, see driver log"
        );
        dump_driver_log(&settings.driver_log).await;
    }
    result
}

async fn launch(settings: &BrowserSettings) -> Result<BrowserSession, BrowserError> {
    let config = browser_config(settings)?;
    let (browser, mut handler) = Browser::launch(config).await.map_err(BrowserError::Launch)?;

    let handler = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(err) = event {
                debug!(error = %err, "chromium handler stopped");
                break;
            }
        }
    });

    info!("chromium session started");
    Ok(BrowserSession { browser, handler })
}

/// Log contents as lossy UTF-8, or `None` when the file cannot be read.
pub async fn read_driver_log(path: &Path) -> Option<String> {
    tokio::fs::read(path)
        .await
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

async fn dump_driver_log(path: &Path) {
    match read_driver_log(path).await {
        Some(contents) => error!(path = %path.display(), "driver log:\n{contents}"),
        None => error!(path = %path.display(), "could not read driver log"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn args_carry_fixed_switches_and_log_file() {
        let args = chrome_args(Path::new("/tmp/driver.log"));
        assert!(args.contains(&"--disable-dev-shm-usage".to_string()));
        assert!(args.contains(&"--disable-gpu".to_string()));
        assert!(args.contains(&"--log-file=/tmp/driver.log".to_string()));
    }

    #[test]
    fn config_builds_with_explicit_executable() {
        let dir = tempfile::tempdir().unwrap();
        let fake_chrome = dir.path().join("chrome");
        std::fs::write(&fake_chrome, b"").unwrap();

        let settings = BrowserSettings {
            executable: Some(fake_chrome),
            driver_log: dir.path().join("driver.log"),
        };
        assert!(browser_config(&settings).is_ok());
    }

    #[test]
    fn config_is_headless_unsandboxed_full_hd() {
        let dir = tempfile::tempdir().unwrap();
        let fake_chrome = dir.path().join("chrome");
        std::fs::write(&fake_chrome, b"").unwrap();

        let settings = BrowserSettings {
            executable: Some(fake_chrome),
            driver_log: dir.path().join("driver.log"),
        };
        // chromiumoxide keeps the options private; its Debug output is the only view
        let rendered = format!("{:?}", browser_config(&settings).unwrap());

        assert!(rendered.contains("headless: New"), "{rendered}");
        assert!(rendered.contains("sandbox: false"), "{rendered}");
        assert!(rendered.contains("window_size: Some((1920, 1080))"), "{rendered}");
        assert!(rendered.contains("\"--disable-dev-shm-usage\""), "{rendered}");
        assert!(rendered.contains("\"--disable-gpu\""), "{rendered}");
    }

    #[tokio::test]
    async fn driver_log_is_read_lossily() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"started\n\xffbad byte").unwrap();

        let contents = read_driver_log(file.path()).await.unwrap();
        assert!(contents.starts_with("started\n"));
        assert!(contents.contains("bad byte"));
    }

    #[tokio::test]
    async fn missing_driver_log_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_driver_log(&dir.path().join("absent.log")).await.is_none());
    }

    #[tokio::test]
    async fn launch_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let settings = BrowserSettings {
            executable: Some(dir.path().join("no-such-chrome")),
            driver_log: dir.path().join("driver.log"),
        };
        assert!(create_chrome_session(&settings).await.is_err());
    }
}
