//! Live accessibility suite: WCAG scans plus structural and ARIA checks
//! against the deployed site. Requires `WEBDRIVER_URL`; skipped otherwise.

mod common;

use site_audit::fixtures;
use site_audit::suites::accessibility as a11y;

#[tokio::test]
async fn every_page_passes_the_wcag_scan() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        common::run_check(&config, |s| a11y::wcag_scan(s, *page)).await;
    }
}

#[tokio::test]
async fn every_page_has_a_single_skip_link() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        common::run_check(&config, |s| a11y::skip_link(s, *page)).await;
    }
}

#[tokio::test]
async fn every_page_has_one_primary_landmark() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        common::run_check(&config, |s| a11y::main_landmark(s, *page)).await;
    }
}

#[tokio::test]
async fn every_page_footer_is_labeled() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        common::run_check(&config, |s| a11y::footer_label(s, *page)).await;
    }
}

#[tokio::test]
async fn visible_heading_order_is_sound_on_every_page() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        common::run_check(&config, |s| a11y::heading_order(s, *page)).await;
    }
}

#[tokio::test]
async fn focused_elements_show_an_outline() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        common::run_check(&config, |s| a11y::focus_outline(s, *page)).await;
    }
}

#[tokio::test]
async fn console_is_clean_on_every_page() {
    let Some(config) = common::live_config() else {
        return;
    };
    for page in fixtures::PAGES {
        let noise = config.extra_console_noise.clone();
        common::run_check(&config, |s| a11y::console_clean(s, *page, noise)).await;
    }
}

#[tokio::test]
async fn homepage_nav_is_labeled() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, |s| a11y::nav_labeled(s, fixtures::HOME)).await;
}

#[tokio::test]
async fn homepage_logo_links_to_root() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::logo_link).await;
}

#[tokio::test]
async fn homepage_decorative_graphics_are_hidden() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::decorative_graphics_hidden).await;
}

#[tokio::test]
async fn homepage_sections_are_labeled() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, |s| a11y::sections_labeled(s, fixtures::HOME)).await;
}

#[tokio::test]
async fn menu_toggle_flips_expanded_state() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::menu_toggle).await;
}

#[tokio::test]
async fn contact_fields_declare_required() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::form_required_fields).await;
}

#[tokio::test]
async fn contact_fields_declare_autofill_hints() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::form_autofill_hints).await;
}

#[tokio::test]
async fn form_status_regions_are_live() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::form_live_regions).await;
}

#[tokio::test]
async fn portal_links_warn_about_new_tab() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::portal_links_warn).await;
}

#[tokio::test]
async fn stats_strip_has_no_headings() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::stats_without_headings).await;
}

#[tokio::test]
async fn tabbing_visits_more_than_five_elements() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::no_focus_trap).await;
}

#[tokio::test]
async fn county_nav_is_labeled() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, |s| a11y::nav_labeled(s, fixtures::COUNTY_BLANCO)).await;
}

#[tokio::test]
async fn county_graphics_are_hidden_unconditionally() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::county_graphics_hidden).await;
}

#[tokio::test]
async fn county_checkmarks_match_list_items() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::county_checkmarks).await;
}

#[tokio::test]
async fn county_sections_are_labeled() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, |s| a11y::sections_labeled(s, fixtures::COUNTY_BLANCO)).await;
}

#[tokio::test]
async fn county_phone_link_is_labeled() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check(&config, a11y::county_phone_label).await;
}

#[tokio::test]
async fn reduced_motion_shows_content_fully_opaque() {
    let Some(config) = common::live_config() else {
        return;
    };
    common::run_check_with_args(
        &config,
        &["--force-prefers-reduced-motion"],
        a11y::reduced_motion_opacity,
    )
    .await;
}
