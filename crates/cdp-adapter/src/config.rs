use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How to reach the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdpConfig {
    /// Chromium binary to launch. Autodetected when unset.
    pub executable: Option<PathBuf>,
    /// Profile directory for a launched browser. A temporary one when unset.
    pub user_data_dir: Option<PathBuf>,
    pub headless: bool,
    /// DevTools endpoint (`ws://…` or `http://host:port`) of an already running browser.
    /// When set nothing is launched.
    pub websocket_url: Option<String>,
    /// Page to open. When attaching without one, the first existing page is used.
    pub start_url: Option<String>,
    /// Upper bound for a single protocol round trip.
    pub default_deadline_ms: u64,
    pub launch_timeout_ms: u64,
}

impl Default for CdpConfig {
    fn default() -> Self {
        Self {
            executable: None,
            user_data_dir: None,
            headless: true,
            websocket_url: None,
            start_url: None,
            default_deadline_ms: 30_000,
            launch_timeout_ms: 20_000,
        }
    }
}

impl CdpConfig {
    pub fn attaches(&self) -> bool {
        self.websocket_url.is_some()
    }
}
