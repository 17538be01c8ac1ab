use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported image format (expected JPEG, PNG or WebP)")]
    UnsupportedFormat,
}
