//! HTTP client for a headless-browser rendering service.
//!
//! Target listing portals build their pages with JavaScript, so a bare GET
//! returns skeleton markup. The rendering service loads the URL in a real
//! browser, waits for network idle plus a short settle delay, and returns
//! the final DOM as HTML. The service opens one browser page per request
//! and disposes of it on every exit path (success, timeout, navigation
//! error), so repeated calls cannot leak sessions; this client bounds the
//! whole round trip with its own request timeout so a wedged render cannot
//! hold the caller either.

pub mod error;

pub use error::{RenderError, Result};

use std::time::Duration;

use serde::Serialize;

/// Extra headroom on top of the navigation ceiling and settle delay, to
/// cover queueing inside the rendering service.
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 15;

const VIEWPORT_WIDTH: u32 = 1280;
const VIEWPORT_HEIGHT: u32 = 800;

#[derive(Debug, Serialize)]
struct Viewport {
    width: u32,
    height: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions {
    wait_until: &'static str,
    timeout: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
    url: &'a str,
    user_agent: &'a str,
    viewport: Viewport,
    /// Third-party certificate problems on target sites are tolerated;
    /// their production TLS hygiene is not this system's concern.
    #[serde(rename = "ignoreHTTPSErrors")]
    ignore_https_errors: bool,
    goto_options: GotoOptions,
    /// Fixed post-idle delay, catching late DOM mutations.
    wait_for_timeout: u64,
}

/// Client for the rendering service's `/content` endpoint.
pub struct RenderClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    user_agent: String,
    nav_timeout_secs: u64,
    settle_ms: u64,
}

impl RenderClient {
    /// Build a render client against `base_url`.
    ///
    /// `nav_timeout_secs` is the navigation ceiling passed to the browser;
    /// `settle_ms` is the fixed post-idle delay before the DOM is captured.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        user_agent: &str,
        nav_timeout_secs: u64,
        settle_ms: u64,
    ) -> Result<Self> {
        let request_timeout = Duration::from_secs(
            nav_timeout_secs + settle_ms.div_ceil(1000) + REQUEST_TIMEOUT_MARGIN_SECS,
        );
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            user_agent: user_agent.to_string(),
            nav_timeout_secs,
            settle_ms,
        })
    }

    /// Fetch the fully rendered HTML for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Http`] on transport failure or timeout, and
    /// [`RenderError::Api`] when the service answers with a non-2xx status
    /// (navigation failure, bad target URL, render crash).
    pub async fn content(&self, url: &str) -> Result<String> {
        let mut endpoint = format!("{}/content", self.base_url);
        if let Some(token) = &self.token {
            endpoint.push_str(&format!("?token={token}"));
        }

        let body = RenderRequest {
            url,
            user_agent: &self.user_agent,
            viewport: Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
            },
            ignore_https_errors: true,
            goto_options: GotoOptions {
                wait_until: "networkidle2",
                timeout: self.nav_timeout_secs * 1000,
            },
            wait_for_timeout: self.settle_ms,
        };

        tracing::debug!(url, "requesting rendered content");
        let resp = self.client.post(&endpoint).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), "render service rejected request");
            return Err(RenderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.text().await?)
    }
}
