//! Where the Gemini API key comes from.
//!
//! In production the key lives in a remote flag document so it can be rotated
//! without a redeploy. A static key from the environment is used otherwise.

use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Field of the remote config document holding the key.
pub const API_KEY_FIELD: &str = "api_key";

/// Default minimum interval between two remote fetches.
pub const DEFAULT_FETCH_INTERVAL_SECS: u64 = 3600;

#[async_trait]
pub trait ApiKeySource: Send + Sync {
    async fn fetch_api_key(&self) -> Result<String>;
}

/// Key configured directly, e.g. through `GEMINI_API_KEY`.
pub struct StaticApiKey(String);

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

#[async_trait]
impl ApiKeySource for StaticApiKey {
    async fn fetch_api_key(&self) -> Result<String> {
        if self.0.trim().is_empty() {
            bail!("API key is not configured");
        }
        Ok(self.0.clone())
    }
}

struct CachedKey {
    value: String,
    fetched_at: Instant,
}

/// Fetches the key from a JSON flag document and keeps it for
/// `fetch_interval`. Failed fetches are not cached.
pub struct RemoteConfigClient {
    client: reqwest::Client,
    url: String,
    fetch_interval: Duration,
    cache: Mutex<Option<CachedKey>>,
}

impl RemoteConfigClient {
    pub fn new(url: impl Into<String>, fetch_interval: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            fetch_interval,
            cache: Mutex::new(None),
        }
    }

    #[instrument(level = "trace", skip(self), fields(url = %self.url))]
    async fn fetch_remote(&self) -> Result<String> {
        debug!("fetching remote config");
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            warn!(%status, "remote config fetch failed");
            bail!("remote config fetch failed with {status}");
        }
        let doc: serde_json::Value = resp.json().await?;
        let key = doc
            .get(API_KEY_FIELD)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("remote config has no {API_KEY_FIELD}"))?;
        Ok(key.to_string())
    }
}

#[async_trait]
impl ApiKeySource for RemoteConfigClient {
    async fn fetch_api_key(&self) -> Result<String> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.fetch_interval {
                debug!("using cached api key");
                return Ok(cached.value.clone());
            }
        }

        let value = self.fetch_remote().await?;
        *cache = Some(CachedKey {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_key_rejects_blank() {
        assert!(StaticApiKey::new("  ").fetch_api_key().await.is_err());
        assert_eq!(StaticApiKey::new("k").fetch_api_key().await.unwrap(), "k");
    }
}
