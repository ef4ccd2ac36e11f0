//! Heading-order rule for the primary landmark.
//!
//! Visible headings must start at level 1 and never step more than one level
//! deeper than the previous visible heading; returning to a shallower level
//! is always allowed. A landmark with no visible headings passes trivially.

use serde::Deserialize;

/// Snapshot script run against the live page: captures every heading inside
/// the primary landmark with its level, truncated text and visibility
pub const SNAPSHOT_JS: &str = "\
const scope = document.querySelector('main#main-content') || document.body;
return Array.from(scope.querySelectorAll('h1, h2, h3, h4, h5, h6')).map((h) => {
  const cs = window.getComputedStyle(h);
  const visible =
    cs.display !== 'none' &&
    cs.visibility !== 'hidden' &&
    h.getClientRects().length > 0;
  return {
    level: Number(h.tagName[1]),
    text: h.textContent.trim().slice(0, 60),
    visible: visible,
  };
});";

/// One heading captured from the live DOM
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    /// Truncated heading text, for diagnostics
    pub text: String,
    /// Whether the heading was rendered visible
    pub visible: bool,
}

impl Heading {
    pub fn new(level: u8, text: &str, visible: bool) -> Self {
        Self {
            level,
            text: text.to_string(),
            visible,
        }
    }
}

/// Validate the visible heading sequence
pub fn check_sequence(headings: &[Heading]) -> Result<(), String> {
    let visible: Vec<&Heading> = headings.iter().filter(|h| h.visible).collect();

    let Some(first) = visible.first() else {
        // No visible headings inside the landmark: trivially fine
        return Ok(());
    };

    if first.level != 1 {
        return Err(format!(
            "first visible heading is h{} ({:?}), expected h1",
            first.level, first.text
        ));
    }

    for pair in visible.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.level > prev.level + 1 {
            return Err(format!(
                "heading jumps from h{} ({:?}) to h{} ({:?})",
                prev.level, prev.text, next.level, next.text
            ));
        }
    }

    Ok(())
}
