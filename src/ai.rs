pub mod config;
pub mod gemini;
pub mod image;
pub mod prompts;
pub mod remote_config;

use std::sync::Arc;

use crate::ai::config::AiConfig;
use crate::ai::gemini::{GeminiClient, DEFAULT_MODEL, GEMINI_API_URL};
use crate::ai::remote_config::StaticApiKey;
use crate::orchestrator::{GenerativeBackend, LazyBackend};

/// Build the Gemini backend. Without AI configuration every request fails
/// at the backend step.
pub fn gemini_backend(config: Option<&AiConfig>) -> LazyBackend {
    match config {
        Some(cfg) => {
            let model = cfg.model.clone();
            let api_url = cfg.api_url.clone();
            LazyBackend::new(cfg.key_source(), move |key| {
                tracing::info!(model = %model, "Initializing Gemini backend");
                Arc::new(GeminiClient::new(key, model.clone(), &api_url))
                    as Arc<dyn GenerativeBackend>
            })
        }
        None => {
            tracing::warn!("GEMINI_API_KEY and REMOTE_CONFIG_URL are unset; answers are disabled");
            LazyBackend::new(Arc::new(StaticApiKey::new("")), |key| {
                Arc::new(GeminiClient::new(key, DEFAULT_MODEL, GEMINI_API_URL))
                    as Arc<dyn GenerativeBackend>
            })
        }
    }
}
