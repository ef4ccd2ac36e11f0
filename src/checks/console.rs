//! Known-error filter for browser console output.
//!
//! The audited site loads third-party analytics and tag-manager scripts that
//! produce console errors outside its control. Those are filtered with an
//! ordered substring allow-list; anything left is an audit failure.

use crate::fixtures;

/// Substring filter over console error messages
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: Vec<String>,
}

impl NoiseFilter {
    /// Build the filter from the built-in allow-list plus extra patterns
    pub fn with_defaults(extra: &[String]) -> Self {
        let mut patterns: Vec<String> = fixtures::CONSOLE_NOISE
            .iter()
            .map(|s| s.to_string())
            .collect();
        patterns.extend(extra.iter().cloned());
        Self { patterns }
    }

    /// True when the message matches a known-noise pattern
    pub fn is_noise(&self, message: &str) -> bool {
        self.patterns.iter().any(|p| message.contains(p.as_str()))
    }

    /// Messages not covered by the allow-list, in original order
    pub fn unexpected<'a>(&self, messages: &'a [String]) -> Vec<&'a String> {
        messages.iter().filter(|m| !self.is_noise(m)).collect()
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::with_defaults(&[])
    }
}
