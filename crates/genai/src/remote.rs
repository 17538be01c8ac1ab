//! HTTP client for the remote generation service

use lumina_config::ServiceConfig;
use lumina_ipc::{DataUri, GenerationRequest};
use tracing::{debug, warn};

use crate::wire::{
    Contents, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::{DesignBackend, GenAiError, prompt};

/// Client for a Gemini-style `generateContent` endpoint
pub struct RemoteGenAi {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl RemoteGenAi {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.api_base, model)
    }

    async fn call(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        if !self.config.has_key() {
            return Err(GenAiError::MissingKey);
        }

        debug!("Calling {} with {} parts", model, request.contents.parts.len());
        let response = self
            .http
            .post(self.endpoint(model))
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

impl DesignBackend for RemoteGenAi {
    async fn generate(&self, request: &GenerationRequest) -> Result<DataUri, GenAiError> {
        let wire_request = GenerateContentRequest {
            contents: Contents {
                parts: prompt::build_parts(request),
            },
            generation_config: None,
        };

        let response = self.call(&self.config.generation_model, &wire_request).await?;
        extract_image(response)
    }

    async fn suggest(&self, base_image: &DataUri) -> Result<Vec<String>, GenAiError> {
        let wire_request = GenerateContentRequest {
            contents: Contents {
                parts: prompt::suggestion_parts(base_image),
            },
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: serde_json::json!({
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }),
            }),
        };

        let response = self.call(&self.config.suggestion_model, &wire_request).await?;
        Ok(parse_suggestions(response))
    }
}

/// Pull the generated image out of a response, mapping every failure
/// shape to its error
fn extract_image(response: GenerateContentResponse) -> Result<DataUri, GenAiError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenAiError::NoCandidate)?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(GenAiError::SafetyBlocked);
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    for part in &parts {
        if let Some(inline) = &part.inline_data {
            if !inline.data.is_empty() {
                // The service tags generated images as PNG
                return Ok(DataUri::from_parts("image/png", inline.data.clone()));
            }
        }
    }

    if let Some(text) = parts.iter().find_map(|p| p.text.clone()) {
        warn!("Service answered with text: {}", text);
        return Err(GenAiError::TextResponse(text));
    }

    Err(GenAiError::Generation(
        candidate.finish_reason.unwrap_or_else(|| "Unknown".to_string()),
    ))
}

/// Parse a suggestion response into a list of strings.
///
/// Missing or malformed payloads degrade to an empty list.
fn parse_suggestions(response: GenerateContentResponse) -> Vec<String> {
    let Some(text) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
    else {
        return Vec::new();
    };

    match serde_json::from_str(&text) {
        Ok(items) => items,
        Err(err) => {
            warn!("Discarding malformed suggestions ({}): {}", err, text);
            Vec::new()
        }
    }
}
