//! Head/meta extraction from page source.

use scraper::{Html, Selector};

/// Document title, whitespace-trimmed
pub fn title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").unwrap();
    doc.select(&selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
}

/// Content of `<meta name="...">`
pub fn meta_content(html: &str, name: &str) -> Option<String> {
    attr_of(html, &format!(r#"meta[name="{name}"]"#), "content")
}

/// Content of `<meta property="...">` (Open Graph style)
pub fn meta_property(html: &str, property: &str) -> Option<String> {
    attr_of(html, &format!(r#"meta[property="{property}"]"#), "content")
}

/// href of `<link rel="canonical">`
pub fn canonical(html: &str) -> Option<String> {
    attr_of(html, r#"link[rel="canonical"]"#, "href")
}

/// hrefs of every `<link>` with the given rel
pub fn link_hrefs(html: &str, rel: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(&format!(r#"link[rel="{rel}"]"#)).unwrap();
    doc.select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect()
}

/// src of every external `<script>`
pub fn script_srcs(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("script[src]").unwrap();
    doc.select(&selector)
        .filter_map(|e| e.value().attr("src"))
        .map(|s| s.to_string())
        .collect()
}

fn attr_of(html: &str, selector: &str, attr: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><head>
        <title>  ECB | Trusted Electric Service in the Texas Hill Country  </title>
        <meta name="description" content="ECB delivers reliable electric service.">
        <meta name="geo.region" content="US-TX">
        <meta property="og:title" content="ECB Texas">
        <meta property="og:image" content="https://www.ecbtexas.com/assets/img/og-card.jpg">
        <link rel="canonical" href="https://www.ecbtexas.com/">
        <link rel="preconnect" href="https://fonts.googleapis.com">
        <link rel="preconnect" href="https://fonts.gstatic.com">
        <script src="https://www.googletagmanager.com/gtag/js?id=G-ABC123"></script>
        <script>window.dataLayer = window.dataLayer || [];</script>
    </head><body></body></html>"#;

    #[test]
    fn test_title_is_trimmed() {
        assert_eq!(
            title(SAMPLE).unwrap(),
            "ECB | Trusted Electric Service in the Texas Hill Country"
        );
    }

    #[test]
    fn test_missing_title() {
        assert!(title("<html><head></head><body></body></html>").is_none());
    }

    #[test]
    fn test_meta_content() {
        assert_eq!(
            meta_content(SAMPLE, "description").unwrap(),
            "ECB delivers reliable electric service."
        );
        assert_eq!(meta_content(SAMPLE, "geo.region").unwrap(), "US-TX");
        assert!(meta_content(SAMPLE, "robots").is_none());
    }

    #[test]
    fn test_meta_property() {
        assert_eq!(meta_property(SAMPLE, "og:title").unwrap(), "ECB Texas");
        assert!(
            meta_property(SAMPLE, "og:image")
                .unwrap()
                .contains("/assets/img/")
        );
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(SAMPLE).unwrap(), "https://www.ecbtexas.com/");
    }

    #[test]
    fn test_link_hrefs_collects_all_matches() {
        let preconnects = link_hrefs(SAMPLE, "preconnect");
        assert_eq!(preconnects.len(), 2);
        assert!(preconnects.iter().any(|h| h.contains("fonts.googleapis.com")));
    }

    #[test]
    fn test_script_srcs_skips_inline_scripts() {
        let srcs = script_srcs(SAMPLE);
        assert_eq!(srcs.len(), 1);
        assert!(srcs[0].contains("googletagmanager.com/gtag/js"));
    }
}
