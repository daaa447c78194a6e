use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{header, Client};
use tokio::time::sleep;
use tse_core::PageFetcher;

/// Pages larger than this are treated as fetch failures.
const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

/// Fetches html over HTTP(S).
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, delay: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, delay })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("HTTP {}", resp.status()));
        }
        if let Some(ct) = resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
            if !is_html(ct) {
                return Err(anyhow!("not html: {ct}"));
            }
        }
        let bytes = resp.bytes().await?;
        if bytes.len() > MAX_PAGE_BYTES {
            return Err(anyhow!("page too large: {} bytes", bytes.len()));
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn is_html(content_type: &str) -> bool {
    content_type.trim_start().to_ascii_lowercase().starts_with("text/html")
}
