//! Shared protocol types for Lumina
//!
//! Defines the data exchanged between the editor engine, the session
//! controller, and the generation service client: encoded image payloads,
//! selection types, design styles, history records, and the generation
//! request.

mod error;
mod image_data;
mod request;
mod types;

pub use error::IpcError;
pub use image_data::DataUri;
pub use request::GenerationRequest;
pub use types::{DesignHistoryItem, DesignStyle, SelectionBox, SelectionMode};
