//! Shared setup for the live suites.
//!
//! The cases in `tests/accessibility.rs` and `tests/seo.rs` run against a
//! deployed site through a WebDriver server, so they are skipped unless
//! `WEBDRIVER_URL` is set. `AUDIT_BASE_URL` overrides the audited origin.

use site_audit::config::SiteConfig;
use site_audit::error::AuditResult;
use site_audit::fixtures;
use site_audit::session::Session;
use std::future::Future;

/// Live configuration, or None when no WebDriver is available
pub fn live_config() -> Option<SiteConfig> {
    let webdriver_url = match std::env::var("WEBDRIVER_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("skipping live audit case: WEBDRIVER_URL is not set");
            return None;
        }
    };

    let base_url = std::env::var("AUDIT_BASE_URL")
        .unwrap_or_else(|_| fixtures::DEFAULT_BASE_URL.to_string());

    let mut config = SiteConfig::new(&base_url);
    config.webdriver_url = webdriver_url;
    Some(config)
}

/// Run one browser-backed check in a fresh session and panic on failure
pub async fn run_check<F, Fut>(config: &SiteConfig, check: F)
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = AuditResult<()>>,
{
    run_check_with_args(config, &[], check).await;
}

/// Same as `run_check`, with extra browser arguments for the session
pub async fn run_check_with_args<F, Fut>(config: &SiteConfig, extra_args: &[&str], check: F)
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = AuditResult<()>>,
{
    let session = Session::connect_with_args(config, extra_args)
        .await
        .expect("webdriver session");
    let result = check(session.clone()).await;
    session.close().await;
    if let Err(e) = result {
        panic!("check failed: {e}");
    }
}
