//! SEO suite: meta tags, structured data, technical SEO signals and the
//! auxiliary sitemap/robots/legal resources.

use crate::SuiteKind;
use crate::checks::{meta, structured_data};
use crate::config::SiteConfig;
use crate::error::{AuditError, AuditResult};
use crate::fixtures::{self, PageSpec};
use crate::http;
use crate::report::CheckOutcome;
use crate::session::Session;
use crate::suites::accessibility::console_clean;
use crate::suites::{emit, run_fetch_case, run_page_case};
use crate::verify::{ensure, ensure_contains, ensure_eq, ensure_matches, ensure_within};
use tokio::sync::mpsc;

/// DOM-ready wall-clock budget, from navigation start
const LOAD_BUDGET_MS: i64 = 5000;

/// Small viewport used for the mobile layout case
const MOBILE_VIEWPORT: (u32, u32) = (375, 667);

const LOAD_TIME_JS: &str = "\
const t = performance.timing;
return t.domContentLoadedEventEnd - t.navigationStart;";

const MOBILE_VISIBILITY_JS: &str = "\
const visible = (el) =>
  el !== null &&
  el.getClientRects().length > 0 &&
  window.getComputedStyle(el).visibility !== 'hidden';
return {
  nav: visible(document.querySelector('header nav')),
  toggle: visible(document.querySelector('button.nav-toggle')),
};";

const CONTACT_FORM_JS: &str = "\
const visible = (el) =>
  el !== null &&
  el.getClientRects().length > 0 &&
  window.getComputedStyle(el).visibility !== 'hidden';
return {
  name: visible(document.querySelector('#contact-name')),
  email: visible(document.querySelector('#contact-email')),
  submit: visible(document.querySelector('#contact-form button[type=\"submit\"]')),
  honeypot: document.querySelector('#contact-form input[name=\"website\"]') !== null,
};";

const IMAGE_DIMENSIONS_JS: &str = "\
const scope = document.querySelector('main#main-content');
if (!scope) return [];
return Array.from(scope.querySelectorAll('img'))
  .filter((img) => {
    const hasAttrs = img.hasAttribute('width') && img.hasAttribute('height');
    const hasRatio = window.getComputedStyle(img).aspectRatio !== 'auto';
    return !(hasAttrs || hasRatio);
  })
  .map((img) => img.getAttribute('src'));";

/// Run every SEO case, sending one outcome per case
pub async fn run(config: SiteConfig, tx: mpsc::Sender<CheckOutcome>) {
    let suite = SuiteKind::Seo;
    let home = fixtures::HOME;
    let base = config.base_url.clone();
    let noise = config.extra_console_noise.clone();

    // Homepage head and behavior checks, one isolated case per topic
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "title-window", &[], title_window).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "meta-description",
            &[],
            meta_description,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "canonical", &[], |s| {
            canonical_exact(s, base.clone())
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "open-graph", &[], |s| {
            open_graph(s, base.clone())
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "twitter-card", &[], twitter_card).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "geo-meta", &[], geo_meta).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "structured-data",
            &[],
            homepage_structured_data,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "load-time", &[], load_time).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "console-clean", &[], |s| {
            console_clean(s, home, noise.clone())
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "mobile-viewport",
            &[],
            mobile_viewport,
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_page_case(&config, suite, home.name, "contact-form", &[], contact_form).await,
    )
    .await;
    emit(
        &tx,
        run_page_case(
            &config,
            suite,
            home.name,
            "images-reserve-space",
            &[],
            images_reserve_space,
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
            "font-preconnect",
            &[],
            font_preconnect,
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
            "analytics-script",
            &[],
            analytics_script,
        )
        .await,
    )
    .await;

    // Plain-HTTP resources
    emit(
        &tx,
        run_fetch_case(&config, suite, "sitemap", "sitemap-xml", || {
            sitemap_ok(base.clone())
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_fetch_case(&config, suite, "robots", "robots-txt", || {
            robots_ok(base.clone())
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_fetch_case(&config, suite, fixtures::PRIVACY.name, "legal-page", || {
            legal_page_ok(base.clone(), fixtures::PRIVACY, "(?i)privacy")
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_fetch_case(&config, suite, fixtures::TERMS.name, "legal-page", || {
            legal_page_ok(base.clone(), fixtures::TERMS, "(?i)terms")
        })
        .await,
    )
    .await;
    emit(
        &tx,
        run_fetch_case(
            &config,
            suite,
            fixtures::COUNTY_INDEX.name,
            "county-index",
            || county_index_ok(base.clone()),
        )
        .await,
    )
    .await;
    emit(
        &tx,
        run_fetch_case(
            &config,
            suite,
            fixtures::COUNTY_BLANCO.name,
            "county-page",
            || blanco_county_ok(base.clone()),
        )
        .await,
    )
    .await;

    ::log::info!("SEO suite finished");
}

/// Exact canonical URL expected for a given origin
pub fn expected_canonical(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

//
// Homepage cases
//

/// Title carries both brand literals and fits the length window
pub async fn title_window(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;
    let title = meta::title(&source)
        .ok_or_else(|| AuditError::Unmet("homepage has no title tag".to_string()))?;

    ensure_contains(&title, "ECB", "title")?;
    ensure_contains(&title, "Texas", "title")?;
    ensure_within(title.chars().count() as i64, 31, 69, "title length")
}

/// Meta description exists, fits the length window and names the service
pub async fn meta_description(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;
    let description = meta::meta_content(&source, "description")
        .ok_or_else(|| AuditError::Unmet("homepage has no meta description".to_string()))?;

    ensure_within(
        description.chars().count() as i64,
        100,
        160,
        "meta description length",
    )?;
    ensure_contains(&description, "electric", "meta description")
}

/// Canonical link equals the exact origin URL
pub async fn canonical_exact(session: Session, base_url: String) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;
    let canonical = meta::canonical(&source)
        .ok_or_else(|| AuditError::Unmet("homepage has no canonical link".to_string()))?;
    ensure_eq(
        canonical.as_str(),
        expected_canonical(&base_url).as_str(),
        "canonical URL",
    )
}

/// Open Graph tags present with the expected image prefix and exact url
pub async fn open_graph(session: Session, base_url: String) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;

    for property in ["og:title", "og:description"] {
        ensure(
            meta::meta_property(&source, property)
                .map(|v| !v.is_empty())
                .unwrap_or(false),
            format!("missing {property}"),
        )?;
    }

    let image = meta::meta_property(&source, "og:image")
        .ok_or_else(|| AuditError::Unmet("missing og:image".to_string()))?;
    ensure_contains(&image, "/assets/img/", "og:image path")?;

    let og_url = meta::meta_property(&source, "og:url")
        .ok_or_else(|| AuditError::Unmet("missing og:url".to_string()))?;
    ensure_eq(
        og_url.as_str(),
        expected_canonical(&base_url).as_str(),
        "og:url",
    )
}

/// Twitter card tags present with the fixed card type
pub async fn twitter_card(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;

    let card = meta::meta_content(&source, "twitter:card")
        .ok_or_else(|| AuditError::Unmet("missing twitter:card".to_string()))?;
    ensure_eq(card.as_str(), "summary_large_image", "twitter:card")?;

    for name in ["twitter:title", "twitter:description"] {
        ensure(
            meta::meta_content(&source, name)
                .map(|v| !v.is_empty())
                .unwrap_or(false),
            format!("missing {name}"),
        )?;
    }
    Ok(())
}

/// Geographic meta tags with the fixed region and place name
pub async fn geo_meta(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;

    let region = meta::meta_content(&source, "geo.region")
        .ok_or_else(|| AuditError::Unmet("missing geo.region".to_string()))?;
    ensure_eq(region.as_str(), "US-TX", "geo.region")?;

    let placename = meta::meta_content(&source, "geo.placename")
        .ok_or_else(|| AuditError::Unmet("missing geo.placename".to_string()))?;
    ensure_contains(&placename, "Texas", "geo.placename")
}

/// Exactly one structured-data block of each required type, with the
/// type-specific shape checks, and at least four blocks overall
pub async fn homepage_structured_data(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;
    let blocks = structured_data::blocks(&source);

    ensure(
        blocks.len() >= 4,
        format!("only {} structured-data block(s), expected at least 4", blocks.len()),
    )?;

    let businesses = structured_data::of_type(&blocks, "LocalBusiness");
    ensure_eq(businesses.len(), 1, "LocalBusiness block count")?;
    structured_data::check_local_business(businesses[0]).map_err(AuditError::Unmet)?;

    let faqs = structured_data::of_type(&blocks, "FAQPage");
    ensure_eq(faqs.len(), 1, "FAQPage block count")?;
    structured_data::check_faq(faqs[0]).map_err(AuditError::Unmet)?;

    let breadcrumbs = structured_data::of_type(&blocks, "BreadcrumbList");
    ensure_eq(breadcrumbs.len(), 1, "BreadcrumbList block count")?;
    structured_data::check_breadcrumbs(breadcrumbs[0]).map_err(AuditError::Unmet)
}

/// DOM-ready must land inside the load budget
pub async fn load_time(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let elapsed = session.eval(LOAD_TIME_JS, vec![]).await?;
    let elapsed = elapsed.as_i64().unwrap_or(i64::MAX);
    ensure(
        elapsed < LOAD_BUDGET_MS,
        format!("DOM-ready took {elapsed} ms, budget is {LOAD_BUDGET_MS} ms"),
    )
}

/// Navigation and menu trigger visible at the mobile viewport, and the
/// viewport meta declares device-width scaling
pub async fn mobile_viewport(session: Session) -> AuditResult<()> {
    let (width, height) = MOBILE_VIEWPORT;
    session.set_viewport(width, height).await?;
    session.goto(fixtures::HOME.path).await?;

    let visibility = session.eval(MOBILE_VISIBILITY_JS, vec![]).await?;
    ensure(
        visibility["nav"].as_bool().unwrap_or(false),
        "navigation hidden at mobile viewport",
    )?;
    ensure(
        visibility["toggle"].as_bool().unwrap_or(false),
        "menu trigger hidden at mobile viewport",
    )?;

    let source = session.source().await?;
    let viewport = meta::meta_content(&source, "viewport")
        .ok_or_else(|| AuditError::Unmet("missing viewport meta tag".to_string()))?;
    ensure_contains(&viewport, "width=device-width", "viewport meta")
}

/// Contact form shows its required inputs, a submit control and the
/// spam-trap field
pub async fn contact_form(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let probe = session.eval(CONTACT_FORM_JS, vec![]).await?;

    for (key, label) in [
        ("name", "name input"),
        ("email", "email input"),
        ("submit", "submit control"),
    ] {
        ensure(
            probe[key].as_bool().unwrap_or(false),
            format!("contact form {label} not visible"),
        )?;
    }
    // The honeypot only needs to exist; its visibility is unconstrained
    ensure(
        probe["honeypot"].as_bool().unwrap_or(false),
        "contact form honeypot field missing",
    )
}

/// Landmark images reserve layout space via dimension attributes or a CSS
/// aspect-ratio
pub async fn images_reserve_space(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let offenders = session.eval(IMAGE_DIMENSIONS_JS, vec![]).await?;
    let offenders = offenders.as_array().cloned().unwrap_or_default();
    ensure(
        offenders.is_empty(),
        format!("images without reserved dimensions: {offenders:?}"),
    )
}

/// At least one preconnect hint targets the web-font provider
pub async fn font_preconnect(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;
    let preconnects = meta::link_hrefs(&source, "preconnect");
    ensure(
        preconnects
            .iter()
            .any(|href| href.contains(fixtures::FONT_PROVIDER_DOMAIN)),
        format!(
            "no preconnect hint for {}; found {preconnects:?}",
            fixtures::FONT_PROVIDER_DOMAIN
        ),
    )
}

/// The analytics tag-manager script is referenced
pub async fn analytics_script(session: Session) -> AuditResult<()> {
    session.goto(fixtures::HOME.path).await?;
    let source = session.source().await?;
    let srcs = meta::script_srcs(&source);
    ensure(
        srcs.iter()
            .any(|src| src.contains(fixtures::ANALYTICS_SCRIPT_PATH)),
        format!(
            "no script referencing {}; found {srcs:?}",
            fixtures::ANALYTICS_SCRIPT_PATH
        ),
    )
}

//
// Plain-HTTP cases
//

/// Sitemap responds successfully and carries the urlset marker
pub async fn sitemap_ok(base_url: String) -> AuditResult<()> {
    let page = http::fetch(&base_url, "/sitemap.xml").await?;
    ensure(
        page.is_success(),
        format!("sitemap.xml returned status {}", page.status),
    )?;
    ensure_contains(&page.body, "<urlset", "sitemap body")?;
    ensure_contains(&page.body, "<loc>", "sitemap body")
}

/// Robots responds successfully with agent rules and a sitemap pointer
pub async fn robots_ok(base_url: String) -> AuditResult<()> {
    let page = http::fetch(&base_url, "/robots.txt").await?;
    ensure(
        page.is_success(),
        format!("robots.txt returned status {}", page.status),
    )?;
    ensure_contains(&page.body, "User-agent", "robots body")?;
    ensure_contains(&page.body, "Sitemap:", "robots body")
}

/// Legal pages respond successfully and their titles name the topic
pub async fn legal_page_ok(
    base_url: String,
    page_spec: PageSpec,
    topic_pattern: &str,
) -> AuditResult<()> {
    let page = http::fetch(&base_url, page_spec.path).await?;
    ensure(
        page.is_success(),
        format!("{} returned status {}", page_spec.path, page.status),
    )?;
    let title = meta::title(&page.body)
        .ok_or_else(|| AuditError::Unmet(format!("{} has no title tag", page_spec.name)))?;
    ensure_matches(&title, topic_pattern, &format!("{} title", page_spec.name))
}

/// County index responds successfully
pub async fn county_index_ok(base_url: String) -> AuditResult<()> {
    let page = http::fetch(&base_url, fixtures::COUNTY_INDEX.path).await?;
    ensure(
        page.is_success(),
        format!("county index returned status {}", page.status),
    )
}

/// Blanco county page responds successfully, names the county in its title
/// and carries a LocalBusiness block
pub async fn blanco_county_ok(base_url: String) -> AuditResult<()> {
    let page = http::fetch(&base_url, fixtures::COUNTY_BLANCO.path).await?;
    ensure(
        page.is_success(),
        format!("blanco county page returned status {}", page.status),
    )?;

    let title = meta::title(&page.body)
        .ok_or_else(|| AuditError::Unmet("blanco county page has no title tag".to_string()))?;
    ensure_contains(&title, "Blanco County", "county title")?;

    let blocks = structured_data::blocks(&page.body);
    ensure(
        !structured_data::of_type(&blocks, "LocalBusiness").is_empty(),
        "blanco county page has no LocalBusiness structured data",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_canonical_normalizes_trailing_slash() {
        assert_eq!(
            expected_canonical("https://www.ecbtexas.com"),
            "https://www.ecbtexas.com/"
        );
        assert_eq!(
            expected_canonical("https://www.ecbtexas.com/"),
            "https://www.ecbtexas.com/"
        );
    }

    #[test]
    fn test_probe_snippets_return_values() {
        for snippet in [
            LOAD_TIME_JS,
            MOBILE_VISIBILITY_JS,
            CONTACT_FORM_JS,
            IMAGE_DIMENSIONS_JS,
        ] {
            assert!(snippet.contains("return"), "snippet lacks return: {snippet}");
        }
    }

    #[test]
    fn test_mobile_viewport_is_small() {
        let (width, height) = MOBILE_VIEWPORT;
        assert!(width < 500 && height < 800);
    }
}
