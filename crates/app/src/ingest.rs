//! Image file import and export

use std::path::{Path, PathBuf};

use lumina_ipc::DataUri;
use tracing::info;

use crate::session::{SessionError, export_file_name};

/// Read an image file into a payload, rejecting unsupported formats
pub fn load_image(path: &Path) -> Result<DataUri, SessionError> {
    let bytes = std::fs::read(path)?;
    let uri = DataUri::from_file_bytes(&bytes)?;
    info!("Loaded {} ({} bytes, {})", path.display(), bytes.len(), uri.mime_type);
    Ok(uri)
}

/// Write a generated result into `dir` under a timestamped name,
/// returning the path written
pub fn export_image(dir: &Path, image: &DataUri, timestamp_ms: u64) -> Result<PathBuf, SessionError> {
    let path = dir.join(export_file_name(timestamp_ms));
    std::fs::write(&path, image.decode()?)?;
    info!("Exported {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_unsupported_format() {
        let dir = std::env::temp_dir();
        let path = dir.join("lumina-test-not-an-image.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let result = load_image(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(SessionError::Ipc(lumina_ipc::IpcError::UnsupportedFormat))
        ));
    }

    #[test]
    fn test_export_round_trip() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]));
        let uri = DataUri::from_rgba(&img).unwrap();

        let dir = std::env::temp_dir();
        let path = export_image(&dir, &uri, 42).unwrap();
        assert!(path.ends_with("lumina-design-42.png"));

        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.mime_type, "image/png");
        assert_eq!(loaded.decode().unwrap(), uri.decode().unwrap());
    }
}
