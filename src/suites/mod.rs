//! The two audit suites and the case runner they share.
//!
//! `start` spawns one task per selected suite; each suite runs its cases
//! sequentially and sends every outcome over the shared channel. A case is a
//! full navigate-observe-assert flow against a fresh browser session with a
//! wall-clock budget; failed cases are retried wholesale, and a failure never
//! stops sibling cases.

pub mod accessibility;
pub mod seo;

use crate::SuiteKind;
use crate::config::SiteConfig;
use crate::error::{AuditError, AuditResult};
use crate::report::CheckOutcome;
use crate::session::Session;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Start the selected suites and return a receiver for case outcomes
///
/// The channel closes when every suite task has finished.
pub async fn start(config: SiteConfig, kinds: Vec<SuiteKind>) -> mpsc::Receiver<CheckOutcome> {
    let (tx, rx) = mpsc::channel::<CheckOutcome>(256);

    for kind in kinds {
        let config = config.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            ::log::info!("Starting {} suite against {}", kind, config.base_url);
            match kind {
                SuiteKind::Accessibility => accessibility::run(config, tx).await,
                SuiteKind::Seo => seo::run(config, tx).await,
            }
        });
    }

    // Drop the original sender so the channel closes once all suites are done
    drop(tx);

    rx
}

/// Run one browser-backed case: fresh session, budgeted, retried wholesale
pub(crate) async fn run_page_case<F, Fut>(
    config: &SiteConfig,
    suite: SuiteKind,
    page: &str,
    check: &'static str,
    extra_browser_args: &[&str],
    case: F,
) -> CheckOutcome
where
    F: Fn(Session) -> Fut,
    Fut: Future<Output = AuditResult<()>>,
{
    let budget = Duration::from_secs(config.case_timeout_secs);
    let attempts = config.retries + 1;
    let mut detail = String::new();

    for attempt in 1..=attempts {
        // Session setup counts against the same budget as the case body; a
        // WebDriver endpoint that accepts the connection but never answers
        // must not stall the suite.
        let mut live: Option<Session> = None;
        let result = timeout(budget, async {
            let session = Session::connect_with_args(config, extra_browser_args).await?;
            live = Some(session.clone());
            case(session).await
        })
        .await;
        if let Some(session) = live {
            session.close().await;
        }

        match result {
            Ok(Ok(())) => return CheckOutcome::passed(suite, page, check, attempt),
            Ok(Err(e)) => detail = e.to_string(),
            Err(_) => detail = AuditError::Timeout(budget).to_string(),
        }
        ::log::warn!(
            "{}/{} attempt {} of {} failed: {}",
            page,
            check,
            attempt,
            attempts,
            detail
        );
    }

    CheckOutcome::failed(suite, page, check, attempts, detail)
}

/// Run one plain-HTTP case (no browser session), budgeted and retried
pub(crate) async fn run_fetch_case<F, Fut>(
    config: &SiteConfig,
    suite: SuiteKind,
    page: &str,
    check: &'static str,
    case: F,
) -> CheckOutcome
where
    F: Fn() -> Fut,
    Fut: Future<Output = AuditResult<()>>,
{
    let budget = Duration::from_secs(config.case_timeout_secs);
    let attempts = config.retries + 1;
    let mut detail = String::new();

    for attempt in 1..=attempts {
        match timeout(budget, case()).await {
            Ok(Ok(())) => return CheckOutcome::passed(suite, page, check, attempt),
            Ok(Err(e)) => detail = e.to_string(),
            Err(_) => detail = AuditError::Timeout(budget).to_string(),
        }
        ::log::warn!(
            "{}/{} attempt {} of {} failed: {}",
            page,
            check,
            attempt,
            attempts,
            detail
        );
    }

    CheckOutcome::failed(suite, page, check, attempts, detail)
}

/// Log and forward an outcome to the consumer
pub(crate) async fn emit(tx: &mpsc::Sender<CheckOutcome>, outcome: CheckOutcome) {
    if outcome.passed {
        ::log::info!("PASS {} {}/{}", outcome.suite, outcome.page, outcome.check);
    } else {
        ::log::warn!(
            "FAIL {} {}/{}: {}",
            outcome.suite,
            outcome.page,
            outcome.check,
            outcome.detail.as_deref().unwrap_or("unknown")
        );
    }

    if let Err(e) = tx.send(outcome).await {
        ::log::error!("Failed to send case outcome: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn runner_config(timeout_secs: u64) -> SiteConfig {
        let mut config = SiteConfig::new("https://www.ecbtexas.com");
        config.case_timeout_secs = timeout_secs;
        config.retries = 2;
        config
    }

    #[tokio::test]
    async fn test_fetch_case_retries_until_pass() {
        let config = runner_config(30);
        let calls = AtomicU32::new(0);

        let outcome = run_fetch_case(&config, SuiteKind::Seo, "sitemap", "sitemap-xml", || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if call < 3 {
                    Err(AuditError::Unmet(format!("transient failure {call}")))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(outcome.passed);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_case_passes_on_first_attempt() {
        let config = runner_config(30);
        let outcome =
            run_fetch_case(&config, SuiteKind::Seo, "robots", "robots-txt", || async {
                Ok(())
            })
            .await;
        assert!(outcome.passed);
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_fetch_case_times_out_after_every_attempt() {
        let config = runner_config(0);
        let calls = AtomicU32::new(0);

        let outcome = run_fetch_case(&config, SuiteKind::Seo, "sitemap", "sitemap-xml", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        })
        .await;

        assert!(!outcome.passed);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(outcome.detail.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_page_case_budget_covers_session_setup() {
        // A WebDriver endpoint that never answers must be cancelled by the
        // case budget; the zero budget makes the stall immediate.
        let mut config = runner_config(0);
        config.webdriver_url = "http://127.0.0.1:9".to_string();

        let outcome = run_page_case(
            &config,
            SuiteKind::Accessibility,
            "home",
            "wcag-scan",
            &[],
            |_session| async { Ok(()) },
        )
        .await;

        assert!(!outcome.passed);
        assert_eq!(outcome.attempts, 3);
        assert!(outcome.detail.unwrap().contains("timed out"));
    }
}
