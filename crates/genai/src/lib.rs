//! Generation service client
//!
//! Talks to a Gemini-style `generateContent` endpoint for two jobs:
//! redesigning a room photo and suggesting design prompts for one.
//! [`DesignBackend`] is the seam the session controller works against;
//! [`RemoteGenAi`] is the HTTP implementation.

pub mod prompt;
pub mod remote;
pub mod wire;

pub use remote::RemoteGenAi;

use lumina_ipc::{DataUri, GenerationRequest};
use thiserror::Error;

/// Errors from the generation service
#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("no API key configured")]
    MissingKey,

    #[error("no candidates returned from the service")]
    NoCandidate,

    #[error("generation was blocked by safety filters")]
    SafetyBlocked,

    #[error("service responded with text instead of an image: {0}")]
    TextResponse(String),

    #[error("generation failed (finish reason: {0})")]
    Generation(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed service response: {0}")]
    InvalidResponse(String),
}

/// Backend that turns generation requests into images and suggestions.
///
/// Abstracted so the session controller can run against a mock in tests.
#[allow(async_fn_in_trait)]
pub trait DesignBackend {
    /// Generate a redesigned image for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<DataUri, GenAiError>;

    /// Suggest short design instructions for the given room photo.
    ///
    /// Unusable suggestion payloads degrade to an empty list rather than
    /// an error; only transport failures surface as `Err`.
    async fn suggest(&self, base_image: &DataUri) -> Result<Vec<String>, GenAiError>;
}
