use std::time::Duration;
use thiserror::Error;

/// Errors produced while running audit checks
///
/// `Unmet` is the interesting variant: it carries the diagnostic label of a
/// failed expectation. Everything else is transport-level (WebDriver, HTTP,
/// parsing) and still fails the owning case the same way.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A WebDriver command failed mid-case
    #[error("webdriver command failed: {0}")]
    Driver(#[from] fantoccini::error::CmdError),

    /// A WebDriver session could not be established
    #[error("webdriver session could not be established: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A plain HTTP request failed (sitemap, robots, legal pages, browser log)
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON (structured data blocks, scan results, config files)
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be parsed or joined
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// An expectation was not met; the string is the diagnostic label
    #[error("{0}")]
    Unmet(String),

    /// The case exceeded its wall-clock budget
    #[error("case timed out after {0:?}")]
    Timeout(Duration),
}

/// Shorthand result alias used throughout the crate
pub type AuditResult<T> = Result<T, AuditError>;
