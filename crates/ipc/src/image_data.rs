//! Encoded image payloads
//!
//! Images cross every boundary in Lumina as data URIs: a MIME type plus
//! base64-encoded bytes. Payloads are immutable once captured - they are
//! only ever replaced, never mutated in place.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::IpcError;

/// An encoded bitmap payload: MIME type + base64 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataUri {
    /// MIME type of the encoded bytes (e.g. `image/png`)
    pub mime_type: String,
    /// Base64-encoded image bytes, without the `data:` prefix
    pub data: String,
}

impl DataUri {
    /// Create a payload from a MIME type and already-encoded base64 data
    pub fn from_parts(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Create a payload by base64-encoding raw image bytes
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Create a payload from raw file bytes, sniffing the format from the
    /// magic bytes. Only JPEG, PNG and WebP are accepted.
    pub fn from_file_bytes(bytes: &[u8]) -> Result<Self, IpcError> {
        let mime = sniff_mime(bytes).ok_or(IpcError::UnsupportedFormat)?;
        Ok(Self::from_bytes(mime, bytes))
    }

    /// Parse a `data:<mime>;base64,<data>` string.
    ///
    /// Strings without the expected prefix are treated as bare base64 PNG
    /// data, so this never fails.
    pub fn parse(uri: &str) -> Self {
        if let Some(rest) = uri.strip_prefix("data:") {
            if let Some((mime, data)) = rest.split_once(";base64,") {
                return Self::from_parts(mime, data);
            }
        }
        // Fallback: assume PNG, strip any stray prefix up to the marker
        let data = match uri.split_once("base64,") {
            Some((_, data)) => data,
            None => uri,
        };
        Self::from_parts("image/png", data)
    }

    /// Decode the base64 payload back to raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, IpcError> {
        Ok(STANDARD.decode(&self.data)?)
    }

    /// Decode the payload into an RGBA raster
    pub fn to_rgba(&self) -> Result<RgbaImage, IpcError> {
        let bytes = self.decode()?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }

    /// Encode an RGBA raster as a PNG payload
    pub fn from_rgba(img: &RgbaImage) -> Result<Self, IpcError> {
        let mut bytes = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut bytes);
        img.write_to(&mut cursor, image::ImageFormat::Png)?;
        Ok(Self::from_bytes("image/png", &bytes))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Sniff the MIME type of image file bytes from their magic numbers
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
