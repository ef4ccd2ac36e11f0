//! Assertion helpers shared by the audit suites.
//!
//! Each helper returns `Err(AuditError::Unmet)` with a diagnostic label when
//! the expectation does not hold, so a case body can chain them with `?` and
//! stop at the first failed expectation.

use crate::error::{AuditError, AuditResult};
use regex::Regex;
use std::fmt::Debug;

/// Require a condition to hold
pub fn ensure(condition: bool, label: impl Into<String>) -> AuditResult<()> {
    if condition {
        Ok(())
    } else {
        Err(AuditError::Unmet(label.into()))
    }
}

/// Require two values to be equal
pub fn ensure_eq<T: PartialEq + Debug>(actual: T, expected: T, label: &str) -> AuditResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(AuditError::Unmet(format!(
            "{label}: expected {expected:?}, got {actual:?}"
        )))
    }
}

/// Require a haystack to contain a literal substring
pub fn ensure_contains(haystack: &str, needle: &str, label: &str) -> AuditResult<()> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(AuditError::Unmet(format!(
            "{label}: {needle:?} not found in {:?}",
            truncate(haystack, 120)
        )))
    }
}

/// Require an element count to be exactly `expected`
pub fn ensure_count(actual: usize, expected: usize, label: &str) -> AuditResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(AuditError::Unmet(format!(
            "{label}: expected {expected} element(s), found {actual}"
        )))
    }
}

/// Require a numeric value to lie within an inclusive range
pub fn ensure_within(actual: i64, min: i64, max: i64, label: &str) -> AuditResult<()> {
    if actual >= min && actual <= max {
        Ok(())
    } else {
        Err(AuditError::Unmet(format!(
            "{label}: {actual} outside [{min}, {max}]"
        )))
    }
}

/// Require a string to match a regex pattern
///
/// The pattern is compiled per call; patterns are short literals and the
/// suites run at most a few dozen of these per audit.
pub fn ensure_matches(haystack: &str, pattern: &str, label: &str) -> AuditResult<()> {
    let regex = Regex::new(pattern)
        .map_err(|e| AuditError::Unmet(format!("{label}: bad pattern {pattern:?}: {e}")))?;
    if regex.is_match(haystack) {
        Ok(())
    } else {
        Err(AuditError::Unmet(format!(
            "{label}: {pattern:?} did not match {:?}",
            truncate(haystack, 120)
        )))
    }
}

/// Truncate a diagnostic string so labels stay readable
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
