//! JSON-LD structured data extraction and per-type shape checks.

use scraper::{Html, Selector};
use serde_json::Value;

/// Parse every `application/ld+json` block on the page
///
/// Top-level arrays are flattened so each entry counts as one block;
/// malformed blocks are logged and skipped rather than failing the whole
/// extraction.
pub fn blocks(html: &str) -> Vec<Value> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    let mut out = Vec::new();
    for node in doc.select(&selector) {
        let raw = node.text().collect::<String>();
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => out.extend(items),
            Ok(value) => out.push(value),
            Err(e) => ::log::warn!("Skipping malformed JSON-LD block: {}", e),
        }
    }
    out
}

/// Blocks whose `@type` discriminator equals `ty`
pub fn of_type<'a>(blocks: &'a [Value], ty: &str) -> Vec<&'a Value> {
    blocks
        .iter()
        .filter(|b| b.get("@type").and_then(Value::as_str) == Some(ty))
        .collect()
}

/// LocalBusiness blocks must carry non-empty name, telephone and email
pub fn check_local_business(block: &Value) -> Result<(), String> {
    for key in ["name", "telephone", "email"] {
        let present = block
            .get(key)
            .and_then(Value::as_str)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if !present {
            return Err(format!("LocalBusiness block missing {key}"));
        }
    }
    Ok(())
}

/// FAQPage blocks must list at least three questions
pub fn check_faq(block: &Value) -> Result<(), String> {
    let entries = block
        .get("mainEntity")
        .and_then(Value::as_array)
        .map(|a| a.len())
        .unwrap_or(0);
    if entries >= 3 {
        Ok(())
    } else {
        Err(format!("FAQPage has {entries} entries, expected at least 3"))
    }
}

/// BreadcrumbList blocks must list at least four items
pub fn check_breadcrumbs(block: &Value) -> Result<(), String> {
    let items = block
        .get("itemListElement")
        .and_then(Value::as_array)
        .map(|a| a.len())
        .unwrap_or(0);
    if items >= 4 {
        Ok(())
    } else {
        Err(format!(
            "BreadcrumbList has {items} items, expected at least 4"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(blocks: &[&str]) -> String {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        format!("<html><head>{scripts}</head><body></body></html>")
    }

    #[test]
    fn test_blocks_parses_and_flattens() {
        let html = page_with(&[
            r#"{"@type": "LocalBusiness", "name": "ECB"}"#,
            r#"[{"@type": "FAQPage"}, {"@type": "BreadcrumbList"}]"#,
        ]);
        let found = blocks(&html);
        assert_eq!(found.len(), 3);
        assert_eq!(of_type(&found, "LocalBusiness").len(), 1);
        assert_eq!(of_type(&found, "FAQPage").len(), 1);
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let html = page_with(&[r#"{"@type": "LocalBusiness""#, r#"{"@type": "FAQPage"}"#]);
        let found = blocks(&html);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_local_business_shape() {
        let ok = serde_json::json!({
            "@type": "LocalBusiness",
            "name": "ECB",
            "telephone": "+1-830-555-0100",
            "email": "office@ecbtexas.com"
        });
        assert!(check_local_business(&ok).is_ok());

        let missing_phone = serde_json::json!({
            "@type": "LocalBusiness",
            "name": "ECB",
            "email": "office@ecbtexas.com"
        });
        let err = check_local_business(&missing_phone).unwrap_err();
        assert!(err.contains("telephone"));

        let blank_name = serde_json::json!({
            "@type": "LocalBusiness",
            "name": "  ",
            "telephone": "x",
            "email": "y"
        });
        assert!(check_local_business(&blank_name).is_err());
    }

    #[test]
    fn test_faq_needs_three_entries() {
        let ok = serde_json::json!({ "mainEntity": [{}, {}, {}] });
        assert!(check_faq(&ok).is_ok());
        let short = serde_json::json!({ "mainEntity": [{}, {}] });
        assert!(check_faq(&short).is_err());
        let absent = serde_json::json!({});
        assert!(check_faq(&absent).is_err());
    }

    #[test]
    fn test_breadcrumbs_need_four_items() {
        let ok = serde_json::json!({ "itemListElement": [{}, {}, {}, {}] });
        assert!(check_breadcrumbs(&ok).is_ok());
        let short = serde_json::json!({ "itemListElement": [{}, {}, {}] });
        assert!(check_breadcrumbs(&short).is_err());
    }
}
