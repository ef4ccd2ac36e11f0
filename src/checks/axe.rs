//! Automated WCAG ruleset scan via axe-core injected into the live page.

use crate::error::{AuditError, AuditResult};
use crate::session::Session;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

/// Rule tag set the scan is restricted to: WCAG 2.0 A/AA, 2.1 A/AA, 2.2 AA
pub const WCAG_TAGS: &[&str] = &["wcag2a", "wcag2aa", "wcag21a", "wcag21aa", "wcag22aa"];

/// Pinned axe-core build injected into audited pages
const AXE_CDN_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/axe-core/4.10.2/axe.min.js";

/// Appends the axe-core script tag to the live document
const INJECT_AXE_JS: &str = "\
const src = arguments[0];
if (typeof window.axe === 'undefined' && !document.querySelector('script[data-audit-axe]')) {
  const script = document.createElement('script');
  script.src = src;
  script.setAttribute('data-audit-axe', '');
  document.head.appendChild(script);
}
return true;";

/// Runs axe against the document with the given tag set and hands the
/// violation list to the completion callback
const RUN_AXE_JS: &str = "\
const tags = arguments[0];
const done = arguments[1];
window.axe
  .run(document, { runOnly: { type: 'tag', values: tags } })
  .then((results) => done({ violations: results.violations }))
  .catch((err) => done({ error: String(err) }));";

/// One rule violation reported by the scan
#[derive(Debug, Clone, Deserialize)]
pub struct Violation {
    /// Rule id (e.g. `color-contrast`)
    pub id: String,
    /// Impact rating; axe omits it for some rules
    pub impact: Option<String>,
    /// Human-readable rule description
    pub description: String,
    /// Affected DOM nodes; only the count is reported
    #[serde(default)]
    pub nodes: Vec<Value>,
}

/// Scan result envelope coming back through the completion callback
#[derive(Debug, Deserialize)]
struct ScanPayload {
    #[serde(default)]
    violations: Vec<Violation>,
    error: Option<String>,
}

/// Inject axe-core into the current page and run the WCAG tag-set scan
pub async fn run_scan(session: &Session) -> AuditResult<Vec<Violation>> {
    session
        .eval(INJECT_AXE_JS, vec![serde_json::json!(AXE_CDN_URL)])
        .await?;

    // The script tag loads asynchronously; wait for the global to appear
    let mut ready = false;
    for _ in 0..50 {
        let loaded = session
            .eval("return typeof window.axe !== 'undefined';", vec![])
            .await?;
        if loaded.as_bool() == Some(true) {
            ready = true;
            break;
        }
        sleep(Duration::from_millis(100)).await;
    }
    if !ready {
        return Err(AuditError::Unmet(
            "axe-core failed to load in the audited page".to_string(),
        ));
    }

    let raw = session
        .eval_async(RUN_AXE_JS, vec![serde_json::json!(WCAG_TAGS)])
        .await?;
    let payload: ScanPayload = serde_json::from_value(raw)?;

    if let Some(error) = payload.error {
        return Err(AuditError::Unmet(format!("axe scan aborted: {error}")));
    }

    ::log::debug!("axe scan finished: {} violation(s)", payload.violations.len());
    Ok(payload.violations)
}

/// Format violations for a failure label: rule id, impact, description and
/// affected node count, one clause per violation
pub fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| {
            format!(
                "{} ({}): {} [{} node(s)]",
                v.id,
                v.impact.as_deref().unwrap_or("unknown"),
                v.description,
                v.nodes.len()
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_every_violation() {
        let violations = vec![
            Violation {
                id: "color-contrast".to_string(),
                impact: Some("serious".to_string()),
                description: "Elements must meet minimum color contrast".to_string(),
                nodes: vec![serde_json::json!({}), serde_json::json!({})],
            },
            Violation {
                id: "region".to_string(),
                impact: None,
                description: "All page content should be contained by landmarks".to_string(),
                nodes: vec![],
            },
        ];
        let text = summary(&violations);
        assert!(text.contains("color-contrast (serious)"));
        assert!(text.contains("[2 node(s)]"));
        assert!(text.contains("region (unknown)"));
    }

    #[test]
    fn test_payload_deserializes_without_error_field() {
        let raw = serde_json::json!({
            "violations": [
                { "id": "label", "impact": "critical", "description": "Form elements must have labels", "nodes": [{}] }
            ]
        });
        let payload: ScanPayload = serde_json::from_value(raw).unwrap();
        assert!(payload.error.is_none());
        assert_eq!(payload.violations.len(), 1);
        assert_eq!(payload.violations[0].id, "label");
    }

    #[test]
    fn test_tag_set_matches_audit_target() {
        assert!(WCAG_TAGS.contains(&"wcag22aa"));
        assert_eq!(WCAG_TAGS.len(), 5);
    }
}
