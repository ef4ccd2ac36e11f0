//! Accessibility suite: WCAG 2.2 AA scans plus structural and ARIA checks
//! for every audited page, with extra case groups for the homepage, the
//! county pages and the reduced-motion preference.

use crate::SuiteKind;
use crate::checks::{axe, console::NoiseFilter, headings};
use crate::config::SiteConfig;
use crate::error::{AuditError, AuditResult};
use crate::fixtures::{self, PageSpec};
use crate::report::CheckOutcome;
use crate::session::Session;
use crate::suites::{emit, run_page_case};
use crate::verify::{ensure, ensure_contains, ensure_count, ensure_eq};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Browser flag forcing the reduced-motion media preference
const REDUCED_MOTION_ARG: &str = "--force-prefers-reduced-motion";

/// Settle delay before reading opacity in the reduced-motion case
const FADE_SETTLE: Duration = Duration::from_millis(1000);

/// Forward focus-traversal steps for the focus-trap probe
const TRAP_PROBE_PRESSES: usize = 15;

// JS snippets evaluated against the live page. Each returns either a scalar
// or a list of offending elements, so the Rust side only asserts emptiness.

const NAV_LABELED_JS: &str = "\
const nav = document.querySelector('header nav');
if (!nav) return 'missing';
return nav.hasAttribute('aria-label') || nav.hasAttribute('aria-labelledby')
  ? 'labeled'
  : 'unlabeled';";

const LOGO_HREF_JS: &str = "\
const logo = document.querySelector('header a.logo');
return logo ? logo.getAttribute('href') : null;";

const DECORATIVE_GRAPHICS_JS: &str = "\
const scope = document.querySelector('main#main-content');
if (!scope) return ['missing landmark'];
return Array.from(scope.querySelectorAll('svg, img'))
  .filter((el) => {
    if (el.tagName.toLowerCase() === 'img' && el.getAttribute('alt')) {
      return false; // informative image, not decorative
    }
    return el.closest('[aria-hidden=\"true\"]') === null;
  })
  .map((el) => el.outerHTML.slice(0, 100));";

const ALL_GRAPHICS_HIDDEN_JS: &str = "\
const scope = document.querySelector('main#main-content');
if (!scope) return ['missing landmark'];
return Array.from(scope.querySelectorAll('svg, img'))
  .filter((el) => el.getAttribute('aria-hidden') !== 'true')
  .map((el) => el.outerHTML.slice(0, 100));";

const SECTIONS_LABELED_JS: &str = "\
const scope = document.querySelector('main#main-content');
if (!scope) return ['missing landmark'];
return Array.from(scope.querySelectorAll(':scope > section'))
  .filter((s) => !s.hasAttribute('aria-label') && !s.hasAttribute('aria-labelledby'))
  .map((s) => s.id || s.className || s.tagName);";

const REQUIRED_FIELDS_JS: &str = "\
return arguments[0]
  .map((sel) => document.querySelector(sel))
  .filter((el) => el === null || (!el.hasAttribute('required') && el.getAttribute('aria-required') !== 'true'))
  .length;";

const AUTOCOMPLETE_JS: &str = "\
const el = document.querySelector(arguments[0]);
return el ? el.getAttribute('autocomplete') : null;";

const PORTAL_LINKS_JS: &str = "\
const domain = arguments[0];
return Array.from(document.querySelectorAll('a[href*=\"' + domain + '\"]'))
  .filter((a) => {
    const sr = a.querySelector('.sr-only');
    return sr === null || !/new tab/i.test(sr.textContent);
  })
  .map((a) => a.getAttribute('href'));";

const FOCUS_OUTLINE_JS: &str = "\
const el = document.activeElement;
const cs = window.getComputedStyle(el);
return { tag: el.tagName, style: cs.outlineStyle, width: cs.outlineWidth };";

const CHECKMARKS_JS: &str = "\
const items = document.querySelectorAll('.county-info li');
const icons = document.querySelectorAll('.county-info li .check-icon');
const hidden = Array.from(icons).filter((el) => el.getAttribute('aria-hidden') === 'true');
return { items: items.length, icons: icons.length, hidden: hidden.length };";

const FADE_OPACITY_JS: &str = "\
return Array.from(document.querySelectorAll('.fade-in'))
  .map((el) => Number(window.getComputedStyle(el).opacity));";

/// Run every accessibility case, sending one outcome per case
pub async fn run(config: SiteConfig, tx: mpsc::Sender<CheckOutcome>) {
    let suite = SuiteKind::Accessibility;
    let noise = config.extra_console_noise.clone();

    // Per-page structural checks
    for page in fixtures::PAGES {
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "wcag-scan", &[], |s| {
                wcag_scan(s, *page)
            })
            .await,
        )
        .await;
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "skip-link", &[], |s| {
                skip_link(s, *page)
            })
            .await,
        )
        .await;
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "main-landmark", &[], |s| {
                main_landmark(s, *page)
            })
            .await,
        )
        .await;
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "footer-label", &[], |s| {
                footer_label(s, *page)
            })
            .await,
        )
        .await;
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "heading-order", &[], |s| {
                heading_order(s, *page)
            })
            .await,
        )
        .await;
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "focus-outline", &[], |s| {
                focus_outline(s, *page)
            })
            .await,
        )
        .await;
        emit(
            &tx,
            run_page_case(&config, suite, page.name, "console-clean", &[], |s| {
                console_clean(s, *page, noise.clone())
            })
            .await,
        )
        .await;
    }

    // Homepage-only checks
    let home = fixtures::HOME;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "nav-labeled", &[], |s| {
            nav_labeled(s, home)
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "logo-link", &[], logo_link).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "decorative-graphics-hidden",
            &[],
            decorative_graphics_hidden,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "sections-labeled", &[], |s| {
            sections_labeled(s, home)
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "menu-toggle", &[], menu_toggle).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "form-required-fields",
            &[],
            form_required_fields,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "form-autofill-hints",
            &[],
            form_autofill_hints,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "form-live-regions",
            &[],
            form_live_regions,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "portal-links-warn",
            &[],
            portal_links_warn,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "stats-without-headings",
            &[],
            stats_without_headings,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "no-focus-trap", &[], no_focus_trap).await,
    )
    .await;

    // County-page checks
    let county = fixtures::COUNTY_BLANCO;
    emit(
        &tx,
        run_page_case(&config, suite, county.name, "nav-labeled", &[], |s| {
            nav_labeled(s, county)
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            county.name,
            "graphics-hidden",
            &[],
            county_graphics_hidden,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            county.name,
            "checkmark-icons",
            &[],
            county_checkmarks,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, county.name, "sections-labeled", &[], |s| {
            sections_labeled(s, county)
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            county.name,
            "phone-link-label",
            &[],
            county_phone_label,
        )
        .await,
    )
    .await;

    // Reduced-motion check, in a session with the forced preference
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "reduced-motion-opacity",
            &[REDUCED_MOTION_ARG],
            reduced_motion_opacity,
        )
        .await,
    )
    .await;

    ::log::info!("Accessibility suite finished");
}

//
// Per-page cases
//

/// Automated WCAG scan must report zero violations
pub async fn wcag_scan(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    let violations = axe::run_scan(&session).await?;
    ensure(
        violations.is_empty(),
        format!(
            "{} wcag violation(s) on {}: {}",
            violations.len(),
            page.name,
            axe::summary(&violations)
        ),
    )
}

/// Exactly one skip link targeting the primary landmark
pub async fn skip_link(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    ensure_count(session.count("a.skip-link").await?, 1, "skip link")?;
    let href = session.attr("a.skip-link", "href").await?.unwrap_or_default();
    ensure_contains(&href, "#main-content", "skip link target")
}

/// Exactly one primary landmark with the fixed anchor id
pub async fn main_landmark(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    ensure_count(
        session.count("main#main-content").await?,
        1,
        "primary landmark",
    )
}

/// Exactly one footer, carrying an accessible label
pub async fn footer_label(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    ensure_count(session.count("footer").await?, 1, "footer")?;
    let label = session.attr("footer", "aria-label").await?;
    ensure(
        label.map(|l| !l.trim().is_empty()).unwrap_or(false),
        "footer has no accessible label",
    )
}

/// Visible headings inside the landmark follow the heading-order rule
pub async fn heading_order(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    let raw = session.eval(headings::SNAPSHOT_JS, vec![]).await?;
    let snapshot: Vec<headings::Heading> = serde_json::from_value(raw)?;
    headings::check_sequence(&snapshot)
        .map_err(|e| AuditError::Unmet(format!("{} heading order: {}", page.name, e)))
}

/// After two forward focus steps the focused element shows a focus outline
pub async fn focus_outline(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    session.press_tab().await?;
    session.press_tab().await?;

    let probe = session.eval(FOCUS_OUTLINE_JS, vec![]).await?;
    let style = probe["style"].as_str().unwrap_or("none");
    let width = probe["width"].as_str().unwrap_or("0px");
    ensure(
        style != "none" || width != "0px",
        format!(
            "focused element {} has no visible outline (style {:?}, width {:?})",
            probe["tag"].as_str().unwrap_or("?"),
            style,
            width
        ),
    )
}

/// No unexpected console errors during load
pub async fn console_clean(
    session: Session,
    page: PageSpec,
    extra_noise: Vec<String>,
) -> AuditResult<()> {
    session.goto(page.path).await?;
    let errors = session.console_errors().await?;
    let filter = NoiseFilter::with_defaults(&extra_noise);
    let unexpected = filter.unexpected(&errors);
    ensure(
        unexpected.is_empty(),
        format!(
            "{} unexpected console error(s) on {}: {}",
            unexpected.len(),
            page.name,
            unexpected
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        ),
    )
}

//
// Homepage cases
//

/// Header navigation region carries an accessible label
pub async fn nav_labeled(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    let state = session.eval(NAV_LABELED_JS, vec![]).await?;
    ensure_eq(
        state.as_str().unwrap_or("missing"),
        "labeled",
        "header navigation labeling",
    )
}

/// Logo link points at the root path, never a placeholder anchor
pub async fn logo_link(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let href = session.eval(LOGO_HREF_JS, vec![]).await?;
    let href = href
        .as_str()
        .ok_or_else(|| AuditError::Unmet("logo link not found".to_string()))?;
    ensure(href != "#", "logo link is a placeholder anchor")?;
    ensure_eq(href, "/", "logo link target")
}

/// Decorative graphics are hidden from assistive tech, directly or through
/// an aria-hidden ancestor
pub async fn decorative_graphics_hidden(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let offenders = session.eval(DECORATIVE_GRAPHICS_JS, vec![]).await?;
    ensure_exposed_list_empty(&offenders, "decorative graphics exposed to assistive tech")
}

/// Every top-level section in the landmark carries a label or label reference
pub async fn sections_labeled(session: Session, page: PageSpec) -> AuditResult<()> {
    session.goto(page.path).await?;
    let offenders = session.eval(SECTIONS_LABELED_JS, vec![]).await?;
    ensure_exposed_list_empty(&offenders, "unlabeled top-level sections")
}

/// Mobile menu toggle exposes expand/collapse state and flips on click
pub async fn menu_toggle(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;

    let toggle = session.find("button.nav-toggle").await?;
    let controls = toggle.attr("aria-controls").await?;
    ensure(
        controls.map(|c| !c.trim().is_empty()).unwrap_or(false),
        "nav toggle missing aria-controls",
    )?;

    let before = toggle.attr("aria-expanded").await?.unwrap_or_default();
    ensure_eq(before.as_str(), "false", "nav toggle initial aria-expanded")?;

    toggle.click().await?;
    sleep(Duration::from_millis(200)).await;

    let after = session
        .attr("button.nav-toggle", "aria-expanded")
        .await?
        .unwrap_or_default();
    ensure_eq(after.as_str(), "true", "nav toggle aria-expanded after click")
}

/// Name and email fields declare themselves required to assistive tech
pub async fn form_required_fields(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let missing = session
        .eval(
            REQUIRED_FIELDS_JS,
            vec![json!(["#contact-name", "#contact-email"])],
        )
        .await?;
    ensure_eq(
        missing.as_u64().unwrap_or(u64::MAX),
        0,
        "form fields without a required declaration",
    )
}

/// Name/email/phone fields carry the matching autofill hints
pub async fn form_autofill_hints(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    for (selector, expected) in [
        ("#contact-name", "name"),
        ("#contact-email", "email"),
        ("#contact-phone", "tel"),
    ] {
        let hint = session.eval(AUTOCOMPLETE_JS, vec![json!(selector)]).await?;
        ensure_eq(
            hint.as_str().unwrap_or(""),
            expected,
            &format!("autocomplete hint on {selector}"),
        )?;
    }
    Ok(())
}

/// Success region is polite, error region is assertive
pub async fn form_live_regions(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let success = session.attr("#form-success", "aria-live").await?;
    ensure_eq(
        success.as_deref().unwrap_or(""),
        "polite",
        "success region aria-live",
    )?;
    let error = session.attr("#form-error", "aria-live").await?;
    ensure_eq(
        error.as_deref().unwrap_or(""),
        "assertive",
        "error region aria-live",
    )
}

/// Member-portal links warn screen-reader users about the new-tab transition
pub async fn portal_links_warn(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let offenders = session
        .eval(PORTAL_LINKS_JS, vec![json!(fixtures::PORTAL_DOMAIN)])
        .await?;
    ensure_exposed_list_empty(&offenders, "portal links without a new-tab warning")
}

/// The stats strip renders without heading elements
pub async fn stats_without_headings(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let count = session
        .eval(
            "return document.querySelectorAll('section.stats-strip :is(h1,h2,h3,h4,h5,h6)').length;",
            vec![],
        )
        .await?;
    ensure_eq(
        count.as_u64().unwrap_or(u64::MAX),
        0,
        "heading elements inside the stats strip",
    )
}

/// Fifteen Tab presses must visit more than five distinct elements
pub async fn no_focus_trap(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;

    let mut visited = HashSet::new();
    for _ in 0..TRAP_PROBE_PRESSES {
        session.press_tab().await?;
        visited.insert(session.focused_descriptor().await?);
    }

    ensure(
        visited.len() > 5,
        format!(
            "focus traversal visited only {} distinct element(s): {:?}",
            visited.len(),
            visited
        ),
    )
}

//
// County-page cases
//

/// Every graphic in the landmark is itself hidden from assistive tech;
/// no ancestor-inherited exemption on county pages
pub async fn county_graphics_hidden(session: Session) -> AuditResult<()> {
    session.goto(fixtures::COUNTY_BLANCO.path).await?;
    let offenders = session.eval(ALL_GRAPHICS_HIDDEN_JS, vec![]).await?;
    ensure_exposed_list_empty(&offenders, "county graphics exposed to assistive tech")
}

/// One hidden checkmark icon per local-info list item
pub async fn county_checkmarks(session: Session) -> AuditResult<()> {
    session.goto(fixtures::COUNTY_BLANCO.path).await?;
    let counts = session.eval(CHECKMARKS_JS, vec![]).await?;
    let items = counts["items"].as_u64().unwrap_or(0);
    let icons = counts["icons"].as_u64().unwrap_or(0);
    let hidden = counts["hidden"].as_u64().unwrap_or(0);

    ensure(items > 0, "county local-info list is empty")?;
    ensure_eq(icons, items, "checkmark icons per list item")?;
    ensure_eq(hidden, icons, "aria-hidden checkmark icons")
}

/// The phone link carries an accessible label
pub async fn county_phone_label(session: Session) -> AuditResult<()> {
    session.goto(fixtures::COUNTY_BLANCO.path).await?;
    let label = session.attr(r#"a[href^="tel:"]"#, "aria-label").await?;
    ensure(
        label.map(|l| !l.trim().is_empty()).unwrap_or(false),
        "phone link has no accessible label",
    )
}

//
// Reduced motion
//

/// With reduced motion forced, every fade-in element is fully opaque after
/// the settle delay
pub async fn reduced_motion_opacity(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    sleep(FADE_SETTLE).await;

    let raw = session.eval(FADE_OPACITY_JS, vec![]).await?;
    let opacities: Vec<f64> = serde_json::from_value(raw)?;
    let translucent: Vec<f64> = opacities.iter().copied().filter(|o| *o < 1.0).collect();
    ensure(
        translucent.is_empty(),
        format!(
            "{} fade-in element(s) not fully opaque under reduced motion: {:?}",
            translucent.len(),
            translucent
        ),
    )
}

/// Shared helper: a JS probe returned a list of offenders that must be empty
fn ensure_exposed_list_empty(value: &Value, label: &str) -> AuditResult<()> {
    let offenders = value.as_array().cloned().unwrap_or_default();
    ensure(
        offenders.is_empty(),
        format!("{label}: {offenders:?}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposed_list_helper() {
        assert!(ensure_exposed_list_empty(&json!([]), "graphics").is_ok());
        let err = ensure_exposed_list_empty(&json!(["<svg>"]), "graphics").unwrap_err();
        assert!(err.to_string().contains("graphics"));
        assert!(err.to_string().contains("<svg>"));
    }

    #[test]
    fn test_snippets_return_values() {
        // Every snippet must be an expression script with a return statement,
        // since WebDriver executes them as function bodies
        for snippet in [
            NAV_LABELED_JS,
            LOGO_HREF_JS,
            DECORATIVE_GRAPHICS_JS,
            ALL_GRAPHICS_HIDDEN_JS,
            SECTIONS_LABELED_JS,
            REQUIRED_FIELDS_JS,
            AUTOCOMPLETE_JS,
            PORTAL_LINKS_JS,
            FOCUS_OUTLINE_JS,
            CHECKMARKS_JS,
            FADE_OPACITY_JS,
        ] {
            assert!(snippet.contains("return"), "snippet lacks return: {snippet}");
        }
    }
}
