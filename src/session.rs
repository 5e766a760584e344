//! Browser connection lifetime.

use std::sync::Arc;

use anyhow::{Context, Result};
use cdp_adapter::{CdpDom, ChromiumTransport};
use dom_port::DomPort;
use tracing::{info, warn};

use crate::config::BrowserSection;

pub struct BrowserSession {
    transport: Arc<ChromiumTransport>,
    attached: bool,
}

impl BrowserSession {
    /// Launch or attach according to `browser`. Fails when no page is reachable.
    pub async fn open(browser: &BrowserSection) -> Result<Self> {
        let cdp = browser.to_cdp_config();
        let attached = cdp.attaches();
        let transport = ChromiumTransport::connect(&cdp).await.with_context(|| {
            match &cdp.websocket_url {
                Some(url) => format!("attaching to browser at {url}"),
                None => "launching chromium".to_string(),
            }
        })?;
        info!(attached, start_url = ?browser.start_url, "browser session opened");
        Ok(Self {
            transport: Arc::new(transport),
            attached,
        })
    }

    pub fn dom(&self) -> Arc<dyn DomPort> {
        Arc::new(CdpDom::new(self.transport.clone()))
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.transport
            .navigate(url)
            .await
            .with_context(|| format!("opening {url}"))
    }

    /// Close a launched browser. Every [`BrowserSession::dom`] handle must be dropped
    /// first.
    pub async fn close(self) {
        match Arc::try_unwrap(self.transport) {
            Ok(transport) => transport.shutdown(self.attached).await,
            Err(_) => warn!("browser session still in use; leaving browser running"),
        }
    }
}
