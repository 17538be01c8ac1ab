//! CPU raster surface for mask painting
//!
//! The mask is an RGBA raster the size of the displayed image. Strokes
//! stamp a fixed translucent color, so overlapping dabs never darken:
//! a pixel is either marked or clear.

use image::RgbaImage;
use lumina_ipc::{DataUri, IpcError};
use tracing::debug;

use crate::constants::MASK_STROKE_COLOR;

/// An RGBA mask raster stored as a flat pixel buffer
#[derive(Debug, Clone)]
pub struct MaskSurface {
    pub width: u32,
    pub height: u32,
    /// Pixel data in row-major order, RGBA
    pixels: Vec<[u8; 4]>,
}

impl MaskSurface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        debug!("Creating {}x{} mask surface", width, height);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; width as usize * height as usize],
        }
    }

    /// Clear the surface back to fully transparent
    pub fn clear(&mut self) {
        self.pixels.fill([0, 0, 0, 0]);
    }

    /// Get a pixel, or None if out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Stamp a filled circle of mask color centered at `(cx, cy)`.
    ///
    /// Marked pixels are written with the fixed stroke color, so
    /// re-stamping the same area is a no-op.
    pub fn stamp_dab(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius <= 0.0 {
            return;
        }

        let x_min = ((cx - radius).floor().max(0.0)) as u32;
        let y_min = ((cy - radius).floor().max(0.0)) as u32;
        let x_max = ((cx + radius).ceil() as u32).min(self.width);
        let y_max = ((cy + radius).ceil() as u32).min(self.height);

        let r_sq = radius * radius;
        for y in y_min..y_max {
            for x in x_min..x_max {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.pixels[y as usize * self.width as usize + x as usize] =
                        MASK_STROKE_COLOR;
                }
            }
        }
    }

    /// True when no pixel has been marked
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 0)
    }

    /// Capture the pixel buffer for the undo history
    pub fn snapshot(&self) -> Vec<[u8; 4]> {
        self.pixels.clone()
    }

    /// Restore a previously captured pixel buffer.
    ///
    /// Snapshots are only valid for the dimensions they were taken at;
    /// mismatched sizes are ignored.
    pub fn restore(&mut self, snapshot: &[[u8; 4]]) {
        if snapshot.len() != self.pixels.len() {
            debug!(
                "Ignoring mask snapshot of {} pixels for {}x{} surface",
                snapshot.len(),
                self.width,
                self.height
            );
            return;
        }
        self.pixels.copy_from_slice(snapshot);
    }

    /// Encode the surface as a PNG data URI
    pub fn to_data_uri(&self) -> Result<DataUri, IpcError> {
        let mut img = RgbaImage::new(self.width, self.height);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let x = (i % self.width as usize) as u32;
            let y = (i / self.width as usize) as u32;
            img.put_pixel(x, y, image::Rgba(*pixel));
        }
        DataUri::from_rgba(&img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_blank() {
        let surface = MaskSurface::new(16, 16);
        assert!(surface.is_blank());
        assert_eq!(surface.get_pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.get_pixel(16, 0), None);
    }

    #[test]
    fn test_stamp_dab_marks_fixed_color() {
        let mut surface = MaskSurface::new(16, 16);
        surface.stamp_dab(8.0, 8.0, 3.0);

        assert!(!surface.is_blank());
        assert_eq!(surface.get_pixel(8, 8), Some(MASK_STROKE_COLOR));
        // Outside the radius stays clear
        assert_eq!(surface.get_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_stamp_is_idempotent() {
        let mut surface = MaskSurface::new(16, 16);
        surface.stamp_dab(8.0, 8.0, 3.0);
        let once = surface.snapshot();

        surface.stamp_dab(8.0, 8.0, 3.0);
        assert_eq!(surface.snapshot(), once);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let mut surface = MaskSurface::new(8, 8);
        // Center outside the surface, radius reaching in
        surface.stamp_dab(-2.0, 4.0, 4.0);
        assert!(!surface.is_blank());
        assert_eq!(surface.get_pixel(0, 4), Some(MASK_STROKE_COLOR));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut surface = MaskSurface::new(8, 8);
        let blank = surface.snapshot();

        surface.stamp_dab(4.0, 4.0, 2.0);
        assert!(!surface.is_blank());

        surface.restore(&blank);
        assert!(surface.is_blank());
    }

    #[test]
    fn test_clear() {
        let mut surface = MaskSurface::new(8, 8);
        surface.stamp_dab(4.0, 4.0, 2.0);
        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_to_data_uri_round_trip() {
        let mut surface = MaskSurface::new(8, 8);
        surface.stamp_dab(4.0, 4.0, 2.0);

        let uri = surface.to_data_uri().unwrap();
        let img = uri.to_rgba().unwrap();
        assert_eq!(img.get_pixel(4, 4).0, MASK_STROKE_COLOR);
    }
}
