//! Configuration file model.

use std::env;
use std::path::PathBuf;

use cdp_adapter::CdpConfig;
use fill_engine::{EngineConfig, FillOptions};
use serde::{Deserialize, Serialize};

pub const ENV_HEADLESS: &str = "FORMFILL_HEADLESS";
pub const ENV_ENDPOINT: &str = "FORMFILL_ENDPOINT";
pub const ENV_CHROME: &str = "FORMFILL_CHROME";

/// Browser to drive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSection {
    pub headless: bool,
    /// Chromium binary; autodetected when unset.
    pub executable: Option<PathBuf>,
    /// DevTools endpoint of a running browser. Nothing is launched when set.
    pub endpoint: Option<String>,
    /// Page to open before filling.
    pub start_url: Option<String>,
    pub user_data_dir: Option<PathBuf>,
    /// Upper bound for one DevTools round trip, in milliseconds.
    pub deadline_ms: u64,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            headless: false,
            executable: None,
            endpoint: None,
            start_url: None,
            user_data_dir: None,
            deadline_ms: 30_000,
        }
    }
}

impl BrowserSection {
    pub fn to_cdp_config(&self) -> CdpConfig {
        CdpConfig {
            executable: self.executable.clone(),
            user_data_dir: self.user_data_dir.clone(),
            headless: self.headless,
            websocket_url: self.endpoint.clone(),
            start_url: self.start_url.clone(),
            default_deadline_ms: self.deadline_ms,
            ..CdpConfig::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserSection,
    pub engine: EngineConfig,
    /// Options used when a trigger does not specify them.
    pub fill: FillOptions,
}

impl Config {
    /// Apply `FORMFILL_*` environment variables on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(ENV_HEADLESS) {
            let lower = value.trim().to_ascii_lowercase();
            self.browser.headless = !matches!(lower.as_str(), "0" | "false" | "no" | "off");
        }
        if let Ok(endpoint) = env::var(ENV_ENDPOINT) {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                self.browser.endpoint = Some(endpoint.to_string());
            }
        }
        if let Ok(chrome) = env::var(ENV_CHROME) {
            if !chrome.trim().is_empty() {
                self.browser.executable = Some(PathBuf::from(chrome.trim()));
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.browser.deadline_ms == 0 {
            return Err("browser.deadline_ms must be greater than zero".into());
        }
        if let Some(endpoint) = &self.browser.endpoint {
            let known = ["ws://", "wss://", "http://", "https://"];
            if !known.iter().any(|scheme| endpoint.starts_with(scheme)) {
                return Err(format!(
                    "browser.endpoint must be a ws:// or http:// url, got {endpoint}"
                ));
            }
        }
        self.engine.validate().map_err(|err| err.to_string())
    }
}
