//! Plain HTTP fetches for resources that are asserted on status and body
//! rather than rendered DOM (sitemap, robots, legal and county pages).

use crate::error::AuditResult;
use url::Url;

/// A fetched resource: final status code and body text
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch `path` relative to `base_url` and return status plus body text
pub async fn fetch(base_url: &str, path: &str) -> AuditResult<FetchedPage> {
    let url = Url::parse(base_url)?.join(path)?;
    ::log::debug!("FETCH: {}", url);

    let response = reqwest::get(url.as_str()).await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    ::log::debug!("Fetched {} -> {} ({} bytes)", url, status, body.len());
    Ok(FetchedPage { status, body })
}

/// POST a JSON payload and return the parsed response body
///
/// Used against the WebDriver server itself for endpoints fantoccini does not
/// wrap (the chromedriver browser log).
pub(crate) async fn post_json(
    url: &str,
    payload: serde_json::Value,
) -> AuditResult<serde_json::Value> {
    let response = reqwest::Client::new().post(url).json(&payload).send().await?;
    let body = response.json::<serde_json::Value>().await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_window() {
        let ok = FetchedPage {
            status: 200,
            body: String::new(),
        };
        let redirect = FetchedPage {
            status: 301,
            body: String::new(),
        };
        let missing = FetchedPage {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }
}
