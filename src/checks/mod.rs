//! Per-topic check logic shared by the audit suites.
//!
//! Everything that can be decided from a page source string or a captured
//! snapshot lives here as plain functions, so the rules are testable without
//! a browser; the suites only gather live state and delegate.

pub mod axe;
pub mod console;
pub mod headings;
pub mod meta;
pub mod structured_data;
