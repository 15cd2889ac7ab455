//! Building the external wheel link and shortening it.

use super::error::GameHopError;
use super::suggestion::Suggestion;
use crate::constants::{SHORTENER_ENDPOINT, SHORTENER_TIMEOUT_SECS, WHEEL_BASE_URL, WHEEL_SUFFIX};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Encodes every queued title, in queue order, as a wheel segment (`c1=..&c2=..`).
pub fn wheel_url(suggestions: &[Suggestion]) -> Result<String, GameHopError> {
    if suggestions.is_empty() {
        return Err(GameHopError::EmptyQueue);
    }
    let choices = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("c{}={}", i + 1, urlencoding::encode(&s.title)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(format!("{WHEEL_BASE_URL}{choices}&{WHEEL_SUFFIX}"))
}

/// Best-effort link shortening. Implementations never fail: when shortening is
/// not possible they hand back the long URL unchanged.
#[async_trait]
pub trait UrlShortener: Send + Sync {
    async fn shorten(&self, long_url: &str) -> String;
}

/// TinyURL's plain-text creation endpoint.
#[derive(Debug, Clone)]
pub struct TinyUrl {
    client: reqwest::Client,
    endpoint: String,
}

impl TinyUrl {
    pub fn new() -> Self {
        Self::with_endpoint(SHORTENER_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SHORTENER_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn request(&self, long_url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(&self.endpoint)
            .query(&[("url", long_url)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl Default for TinyUrl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlShortener for TinyUrl {
    async fn shorten(&self, long_url: &str) -> String {
        match self.request(long_url).await {
            Ok(body) if !body.trim().is_empty() => {
                debug!(short = %body.trim(), "shortened wheel url");
                body.trim().to_string()
            }
            Ok(_) => {
                warn!("url shortener returned an empty body; using the long url");
                long_url.to_string()
            }
            Err(e) => {
                warn!(error = %e, "url shortening failed; using the long url");
                long_url.to_string()
            }
        }
    }
}
