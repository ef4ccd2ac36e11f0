// Re-export modules
pub mod checks;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod report;
pub mod session;
pub mod suites;
pub mod verify;

// Re-export commonly used types for convenience
pub use error::{AuditError, AuditResult};
pub use report::{AuditSummary, CheckOutcome};

use config::SiteConfig;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use url::Url;

/// Audit suites that can be run against the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteKind {
    /// WCAG 2.2 AA and structural/ARIA checks
    Accessibility,
    /// Meta tags, structured data and technical SEO signals
    Seo,
}

impl std::fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuiteKind::Accessibility => write!(f, "accessibility"),
            SuiteKind::Seo => write!(f, "seo"),
        }
    }
}

/// Main builder for running audit suites against a deployed site
pub struct Audit {
    config: SiteConfig,
    suites: Vec<SuiteKind>,
}

impl Audit {
    /// Create a new Audit builder for the given origin
    pub fn new(base_url: &str) -> Self {
        Self {
            config: SiteConfig::new(base_url),
            suites: vec![SuiteKind::Accessibility, SuiteKind::Seo],
        }
    }

    /// Restrict the run to the given suites
    pub fn with_suites(mut self, suites: Vec<SuiteKind>) -> Self {
        self.suites = suites;
        self
    }

    /// Set the WebDriver URL
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Set the per-case wall-clock budget in seconds
    pub fn with_case_timeout(mut self, seconds: u64) -> Self {
        self.config.case_timeout_secs = seconds;
        self
    }

    /// Set the wholesale retries allowed per failed case
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Replace the configuration entirely
    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> AuditResult<Self> {
        let config = SiteConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> AuditResult<Self> {
        let config = serde_json::from_str(config_str)?;
        Ok(self.with_config(config))
    }

    /// Start the selected suites and get a receiver for case outcomes
    pub async fn run(mut self) -> AuditResult<mpsc::Receiver<CheckOutcome>> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        // Reject unusable origins before spawning anything
        Url::parse(&self.config.base_url)?;

        let receiver = suites::start(self.config, self.suites).await;
        Ok(receiver)
    }
}
