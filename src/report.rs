use crate::SuiteKind;
use serde::{Deserialize, Serialize};

/// Outcome of a single audit case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Suite the case belongs to
    pub suite: SuiteKind,

    /// Label of the page (or resource) the case ran against
    pub page: String,

    /// Name of the check
    pub check: String,

    /// Whether the case passed
    pub passed: bool,

    /// Attempts consumed, including retries
    pub attempts: u32,

    /// Diagnostic label of the failed expectation, if any
    pub detail: Option<String>,
}

impl CheckOutcome {
    /// Record a passing case
    pub fn passed(suite: SuiteKind, page: &str, check: &str, attempts: u32) -> Self {
        Self {
            suite,
            page: page.to_string(),
            check: check.to_string(),
            passed: true,
            attempts,
            detail: None,
        }
    }

    /// Record a failed case with its diagnostic label
    pub fn failed(suite: SuiteKind, page: &str, check: &str, attempts: u32, detail: String) -> Self {
        Self {
            suite,
            page: page.to_string(),
            check: check.to_string(),
            passed: false,
            attempts,
            detail: Some(detail),
        }
    }
}

/// Running tally over a whole audit
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl AuditSummary {
    /// Fold one outcome into the tally
    pub fn record(&mut self, outcome: &CheckOutcome) {
        self.total += 1;
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// True when no case failed
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tally() {
        let mut summary = AuditSummary::default();
        summary.record(&CheckOutcome::passed(SuiteKind::Seo, "home", "title", 1));
        summary.record(&CheckOutcome::failed(
            SuiteKind::Accessibility,
            "home",
            "skip-link",
            3,
            "skip link missing".to_string(),
        ));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = CheckOutcome::passed(SuiteKind::Accessibility, "home", "landmark", 1);
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"landmark\""));
        assert!(json.contains("\"passed\":true"));
    }
}
