//! Generation request assembled by the session controller

use serde::{Deserialize, Serialize};

use crate::{DataUri, DesignStyle};

/// Everything the generation backend needs to produce a redesigned image.
///
/// The session controller guarantees that at most one of `mask_image` and
/// `region_hint` is set: a painted mask wins over a box selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The photo being redesigned
    pub base_image: DataUri,
    /// Optional style reference photo (palette and mood source)
    pub reference_image: Option<DataUri>,
    /// Optional product photo to place into the scene
    pub object_image: Option<DataUri>,
    /// Optional painted mask marking the region to change
    pub mask_image: Option<DataUri>,
    /// Free-form user instructions
    pub prompt: String,
    pub style: DesignStyle,
    /// Textual hint for a box selection, used when no mask is present
    pub region_hint: Option<String>,
}

impl GenerationRequest {
    /// Minimal request: base image, prompt and style only
    pub fn new(base_image: DataUri, prompt: impl Into<String>, style: DesignStyle) -> Self {
        Self {
            base_image,
            reference_image: None,
            object_image: None,
            mask_image: None,
            prompt: prompt.into(),
            style,
            region_hint: None,
        }
    }
}
