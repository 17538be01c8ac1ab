//! Service configuration for Lumina
//!
//! Holds the endpoint and model settings for the generation service.
//! Values come from compiled defaults, overridable through `LUMINA_*`
//! environment variables.

use serde::{Deserialize, Serialize};

/// Default API base for the generation service
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for image generation
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash-image";

/// Model used for prompt suggestions
pub const DEFAULT_SUGGESTION_MODEL: &str = "gemini-2.5-flash";

/// Connection settings for the generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL of the service, without a trailing slash
    pub api_base: String,
    pub generation_model: String,
    pub suggestion_model: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            suggestion_model: DEFAULT_SUGGESTION_MODEL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Build a config from the environment.
    ///
    /// `LUMINA_API_KEY` supplies the key; `LUMINA_API_BASE` optionally
    /// overrides the endpoint. Missing variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("LUMINA_API_KEY") {
            config.api_key = key;
        } else {
            tracing::warn!("LUMINA_API_KEY not set; generation requests will be rejected");
        }

        if let Ok(base) = std::env::var("LUMINA_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        config
    }

    /// True when an API key is configured
    pub fn has_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
