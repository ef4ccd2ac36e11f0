use crate::fixtures;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AuditResult;

/// Configuration for an audit run against a deployed site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin of the deployed site under audit
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL of the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Extra arguments passed to the browser for every session
    #[serde(default = "default_browser_args")]
    pub browser_args: Vec<String>,

    /// Wall-clock budget per case, in seconds
    #[serde(default = "default_case_timeout_secs")]
    pub case_timeout_secs: u64,

    /// Wholesale re-executions allowed after a failed case
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Fixed settle delay after navigation, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Additional console-noise substrings beyond the built-in allow-list
    #[serde(default)]
    pub extra_console_noise: Vec<String>,
}

impl SiteConfig {
    /// Create a configuration with default values for the given origin
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            webdriver_url: default_webdriver_url(),
            browser_args: default_browser_args(),
            case_timeout_secs: default_case_timeout_secs(),
            retries: default_retries(),
            settle_ms: default_settle_ms(),
            extra_console_noise: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(&default_base_url())
    }
}

/// Default value for base_url
fn default_base_url() -> String {
    fixtures::DEFAULT_BASE_URL.to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default browser arguments (headless, deterministic viewport)
fn default_browser_args() -> Vec<String> {
    vec![
        "--headless=new".to_string(),
        "--window-size=1280,900".to_string(),
    ]
}

/// Default per-case wall-clock budget
fn default_case_timeout_secs() -> u64 {
    30
}

/// Default wholesale retries per failed case
fn default_retries() -> u32 {
    2
}

/// Default post-navigation settle delay
fn default_settle_ms() -> u64 {
    500
}
