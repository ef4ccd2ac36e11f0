//! WebDriver session wrapper: the narrow browser capability surface the audit
//! suites consume (navigation with settle, DOM queries, inline JS evaluation,
//! keyboard dispatch, viewport control, console log collection).

use crate::config::SiteConfig;
use crate::error::{AuditError, AuditResult};
use crate::http;
use fantoccini::elements::Element;
use fantoccini::key::Key;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// A live browser session bound to the audited origin
///
/// Cloning is cheap: clones share the same underlying WebDriver session.
#[derive(Clone)]
pub struct Session {
    client: Client,
    base: Url,
    webdriver_url: String,
    settle: Duration,
}

impl Session {
    /// Establish a session using the configured browser arguments
    pub async fn connect(config: &SiteConfig) -> AuditResult<Self> {
        Self::connect_with_args(config, &[]).await
    }

    /// Establish a session with extra browser arguments appended
    ///
    /// Used by the reduced-motion case, which forces the media preference via
    /// a browser flag because plain WebDriver has no media emulation command.
    pub async fn connect_with_args(config: &SiteConfig, extra: &[&str]) -> AuditResult<Self> {
        let base = Url::parse(&config.base_url)?;

        let mut args: Vec<String> = config.browser_args.clone();
        args.extend(extra.iter().map(|s| s.to_string()));

        let mut caps = serde_json::map::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({ "args": args }),
        );
        // Browser console entries are collected through the log endpoint
        caps.insert(
            "goog:loggingPrefs".to_string(),
            serde_json::json!({ "browser": "ALL" }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await?;

        ::log::debug!(
            "Connected to WebDriver at {} for {}",
            config.webdriver_url,
            config.base_url
        );

        Ok(Self {
            client,
            base,
            webdriver_url: config.webdriver_url.trim_end_matches('/').to_string(),
            settle: Duration::from_millis(config.settle_ms),
        })
    }

    /// Navigate to a path relative to the audited origin, wait for the
    /// document to finish loading, then apply the fixed settle delay
    pub async fn goto(&self, path: &str) -> AuditResult<()> {
        let url = self.base.join(path)?;
        ::log::debug!("GOTO: {}", url);

        self.client.goto(url.as_str()).await?;
        self.wait_for_ready().await?;
        sleep(self.settle).await;
        Ok(())
    }

    /// Poll document.readyState until the load event has fired
    async fn wait_for_ready(&self) -> AuditResult<()> {
        for _ in 0..100 {
            let state = self
                .client
                .execute("return document.readyState;", vec![])
                .await?;
            if state.as_str() == Some("complete") {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        ::log::warn!("document.readyState did not reach complete; continuing anyway");
        Ok(())
    }

    /// Full page source
    pub async fn source(&self) -> AuditResult<String> {
        Ok(self.client.source().await?)
    }

    /// Evaluate an inline script against the live document
    pub async fn eval(&self, script: &str, args: Vec<Value>) -> AuditResult<Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Evaluate a callback-style script (last argument is the completion
    /// callback) against the live document
    pub async fn eval_async(&self, script: &str, args: Vec<Value>) -> AuditResult<Value> {
        Ok(self.client.execute_async(script, args).await?)
    }

    /// Find a single element by CSS selector
    pub async fn find(&self, css: &str) -> AuditResult<Element> {
        Ok(self.client.find(Locator::Css(css)).await?)
    }

    /// Find all elements matching a CSS selector
    pub async fn find_all(&self, css: &str) -> AuditResult<Vec<Element>> {
        Ok(self.client.find_all(Locator::Css(css)).await?)
    }

    /// Number of elements matching a CSS selector
    pub async fn count(&self, css: &str) -> AuditResult<usize> {
        Ok(self.find_all(css).await?.len())
    }

    /// Attribute of the first element matching a CSS selector
    pub async fn attr(&self, css: &str, name: &str) -> AuditResult<Option<String>> {
        Ok(self.find(css).await?.attr(name).await?)
    }

    /// Dispatch a single forward focus-traversal step (Tab key)
    pub async fn press_tab(&self) -> AuditResult<()> {
        let target = self.client.active_element().await?;
        target
            .send_keys(&String::from(char::from(Key::Tab)))
            .await?;
        Ok(())
    }

    /// Identifier of the currently focused element (tag, id, classes)
    pub async fn focused_descriptor(&self) -> AuditResult<String> {
        let value = self
            .eval(
                "const el = document.activeElement; \
                 return el.tagName + '#' + (el.id || '') + '.' + (el.getAttribute('class') || '');",
                vec![],
            )
            .await?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AuditError::Unmet("no focused element descriptor".to_string()))
    }

    /// Resize the browser window (the viewport, in headless mode)
    pub async fn set_viewport(&self, width: u32, height: u32) -> AuditResult<()> {
        self.client.set_window_size(width, height).await?;
        Ok(())
    }

    /// Drain browser console entries logged since the last drain, keeping
    /// error-level messages only
    ///
    /// fantoccini does not wrap the log endpoint, so this posts to the
    /// chromedriver session directly using the session id it exposes.
    pub async fn console_errors(&self) -> AuditResult<Vec<String>> {
        let session_id = match self.client.session_id().await? {
            Some(id) => id,
            None => {
                ::log::warn!("No active session id; cannot collect console log");
                return Ok(Vec::new());
            }
        };

        let endpoint = format!("{}/session/{}/log", self.webdriver_url, session_id);
        let response = http::post_json(&endpoint, serde_json::json!({ "type": "browser" })).await?;

        let mut errors = Vec::new();
        if let Some(entries) = response.get("value").and_then(Value::as_array) {
            for entry in entries {
                if entry.get("level").and_then(Value::as_str) == Some("SEVERE") {
                    if let Some(message) = entry.get("message").and_then(Value::as_str) {
                        errors.push(message.to_string());
                    }
                }
            }
        } else {
            ::log::warn!("Browser log endpoint returned no entries: {}", response);
        }

        ::log::debug!("Collected {} console error(s)", errors.len());
        Ok(errors)
    }

    /// Close the underlying WebDriver session
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
    }
}
