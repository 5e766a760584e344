use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CdpConfig;
use crate::error::{AdapterError, AdapterErrorKind};

/// Evaluates JavaScript in the target page and returns the JSON result.
#[async_trait]
pub trait CdpTransport: Send + Sync {
    async fn evaluate(&self, expression: String) -> Result<Value, AdapterError>;
}

/// Transport over a `chromiumoxide` browser connection bound to one page.
pub struct ChromiumTransport {
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
    deadline: Duration,
}

impl ChromiumTransport {
    /// Launch Chromium, or attach to `websocket_url` when configured, and pick the page.
    pub async fn connect(cfg: &CdpConfig) -> Result<Self, AdapterError> {
        let (mut browser, mut handler) = match cfg.websocket_url.as_deref() {
            Some(url) => Browser::connect(url.to_string()).await.map_err(|err| {
                AdapterError::new(AdapterErrorKind::CdpIo)
                    .with_hint(format!("failed to attach to {url}: {err}"))
            })?,
            None => Browser::launch(Self::browser_config(cfg)?)
                .await
                .map_err(|err| {
                    AdapterError::new(AdapterErrorKind::Launch)
                        .with_hint(format!("failed to launch chromium: {err}"))
                })?,
        };

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!(target: "cdp-transport", ?err, "handler event error");
                }
            }
            debug!(target: "cdp-transport", "browser handler finished");
        });

        let page = match Self::pick_page(&mut browser, cfg).await {
            Ok(page) => page,
            Err(err) => {
                handler_task.abort();
                return Err(err);
            }
        };

        info!(
            target: "cdp-transport",
            attached = cfg.attaches(),
            headless = cfg.headless,
            "chromium page ready"
        );

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler_task,
            deadline: Duration::from_millis(cfg.default_deadline_ms),
        })
    }

    fn browser_config(cfg: &CdpConfig) -> Result<BrowserConfig, AdapterError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_millis(cfg.default_deadline_ms))
            .launch_timeout(Duration::from_millis(cfg.launch_timeout_ms));

        if !cfg.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &cfg.executable {
            if !executable.exists() {
                return Err(AdapterError::new(AdapterErrorKind::Launch).with_hint(format!(
                    "chrome executable not found at {}",
                    executable.display()
                )));
            }
            builder = builder.chrome_executable(executable.clone());
        }
        if let Some(dir) = &cfg.user_data_dir {
            builder = builder.user_data_dir(dir.clone());
        }

        builder
            .args(vec![
                "--disable-background-networking",
                "--disable-default-apps",
                "--disable-dev-shm-usage",
                "--disable-extensions",
                "--disable-popup-blocking",
                "--no-first-run",
                "--no-default-browser-check",
            ])
            .build()
            .map_err(|err| {
                AdapterError::new(AdapterErrorKind::Launch)
                    .with_hint(format!("browser config error: {err}"))
            })
    }

    async fn pick_page(browser: &mut Browser, cfg: &CdpConfig) -> Result<Page, AdapterError> {
        let page_error = |err: chromiumoxide::error::CdpError| {
            AdapterError::new(AdapterErrorKind::PageUnavailable).with_hint(err.to_string())
        };

        if let Some(url) = cfg.start_url.as_deref() {
            let page = browser.new_page(url).await.map_err(page_error)?;
            page.wait_for_navigation().await.map_err(page_error)?;
            return Ok(page);
        }

        if cfg.attaches() {
            if let Err(err) = browser.fetch_targets().await {
                warn!(target: "cdp-transport", ?err, "failed to fetch existing targets");
            }
            // Attached targets are registered by the handler asynchronously.
            tokio::time::sleep(Duration::from_millis(200)).await;
            let pages = browser.pages().await.map_err(page_error)?;
            if let Some(page) = pages.into_iter().next() {
                return Ok(page);
            }
        }

        browser.new_page("about:blank").await.map_err(page_error)
    }

    /// Navigate the bound page and wait for the load to finish.
    pub async fn navigate(&self, url: &str) -> Result<(), AdapterError> {
        self.page
            .goto(url)
            .await
            .map_err(|err| {
                AdapterError::new(AdapterErrorKind::PageUnavailable)
                    .with_hint(format!("navigation to {url} failed: {err}"))
            })?;
        Ok(())
    }

    /// Close a launched browser. An attached browser is left running.
    pub async fn shutdown(self, attached: bool) {
        if !attached {
            let mut browser = self.browser.lock().await;
            if let Err(err) = browser.close().await {
                warn!(target: "cdp-transport", ?err, "failed to close browser");
            }
            if let Err(err) = browser.wait().await {
                debug!(target: "cdp-transport", ?err, "browser process wait failed");
            }
        }
        self.handler_task.abort();
    }
}

#[async_trait]
impl CdpTransport for ChromiumTransport {
    async fn evaluate(&self, expression: String) -> Result<Value, AdapterError> {
        let result = tokio::time::timeout(self.deadline, self.page.evaluate(expression))
            .await
            .map_err(|_| {
                AdapterError::new(AdapterErrorKind::Timeout).with_hint("Runtime.evaluate")
            })?
            .map_err(|err| AdapterError::new(AdapterErrorKind::CdpIo).with_hint(err.to_string()))?;

        result.into_value::<Value>().map_err(|err| {
            AdapterError::new(AdapterErrorKind::Bridge)
                .with_hint(format!("unexpected evaluation result: {err}"))
        })
    }
}
