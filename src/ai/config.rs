use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::gemini::{DEFAULT_MODEL, GEMINI_API_URL};
use crate::ai::remote_config::{
    ApiKeySource, RemoteConfigClient, StaticApiKey, DEFAULT_FETCH_INTERVAL_SECS,
};

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub remote_config_url: Option<String>,
    pub fetch_interval_secs: u64,
}

impl AiConfig {
    /// Returns `None` when neither a key nor a remote config URL is set.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let remote_config_url = env::var("REMOTE_CONFIG_URL").ok().filter(|u| !u.is_empty());
        if api_key.is_none() && remote_config_url.is_none() {
            return None;
        }
        Some(Self {
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_API_URL.to_string()),
            remote_config_url,
            fetch_interval_secs: env::var("REMOTE_CONFIG_FETCH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FETCH_INTERVAL_SECS),
        })
    }

    /// The remote config wins over a static key when both are set.
    pub fn key_source(&self) -> Arc<dyn ApiKeySource> {
        match &self.remote_config_url {
            Some(url) => Arc::new(RemoteConfigClient::new(
                url.clone(),
                Duration::from_secs(self.fetch_interval_secs),
            )),
            None => Arc::new(StaticApiKey::new(self.api_key.clone().unwrap_or_default())),
        }
    }
}
