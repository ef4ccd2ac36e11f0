//! Declarative fixtures: the audited page roster, the console noise
//! allow-list, and site-wide literals shared by both suites.

/// A page under audit: a human-readable label and the path relative to the
/// deployed origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// Label used in check outcomes
    pub name: &'static str,
    /// URL path, always starting with `/`
    pub path: &'static str,
}

/// The homepage
pub const HOME: PageSpec = PageSpec {
    name: "home",
    path: "/",
};

/// Privacy policy page
pub const PRIVACY: PageSpec = PageSpec {
    name: "privacy",
    path: "/privacy.html",
};

/// Terms of service page
pub const TERMS: PageSpec = PageSpec {
    name: "terms",
    path: "/terms.html",
};

/// County landing index
pub const COUNTY_INDEX: PageSpec = PageSpec {
    name: "counties",
    path: "/counties/",
};

/// Blanco County landing page
pub const COUNTY_BLANCO: PageSpec = PageSpec {
    name: "blanco-county",
    path: "/counties/blanco.html",
};

/// Every page the accessibility suite scans
pub const PAGES: &[PageSpec] = &[HOME, PRIVACY, TERMS, COUNTY_INDEX, COUNTY_BLANCO];

/// Default deployed origin the audit runs against
pub const DEFAULT_BASE_URL: &str = "https://www.ecbtexas.com";

/// Known benign third-party console noise; messages containing any of these
/// substrings are not counted as unexpected errors
pub const CONSOLE_NOISE: &[&str] = &[
    "favicon.ico",
    "googletagmanager.com",
    "google-analytics.com",
];

/// External member-portal domain; links to it must warn screen-reader users
/// about the new-tab transition
pub const PORTAL_DOMAIN: &str = "ecb.smarthub.coop";

/// Web-font provider that must be covered by a preconnect hint
pub const FONT_PROVIDER_DOMAIN: &str = "fonts.googleapis.com";

/// Analytics tag-manager script path expected somewhere in the page scripts
pub const ANALYTICS_SCRIPT_PATH: &str = "googletagmanager.com/gtag/js";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_roster_paths_are_rooted() {
        for page in PAGES {
            assert!(
                page.path.starts_with('/'),
                "page '{}' has a non-rooted path: {}",
                page.name,
                page.path
            );
            assert!(!page.name.is_empty());
        }
    }

    #[test]
    fn test_page_roster_has_no_duplicates() {
        for (i, a) in PAGES.iter().enumerate() {
            for b in &PAGES[i + 1..] {
                assert_ne!(a.path, b.path, "duplicate path in page roster");
            }
        }
    }

    #[test]
    fn test_noise_patterns_do_not_subsume_each_other() {
        for (i, a) in CONSOLE_NOISE.iter().enumerate() {
            for (j, b) in CONSOLE_NOISE.iter().enumerate() {
                if i != j {
                    assert!(!a.contains(b), "noise pattern {a:?} is covered by {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_roster_covers_home_and_blanco() {
        assert!(PAGES.contains(&HOME));
        assert!(PAGES.contains(&COUNTY_BLANCO));
    }
}
