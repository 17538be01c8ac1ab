//! Mask painting canvas
//!
//! Owns the mask raster, the brush engine and the snapshot undo history.
//! Stroke handling lives in [`stroke`], undo/redo in [`undo`].

mod stroke;
mod undo;

pub use undo::SnapshotHistory;

use lumina_ipc::{DataUri, IpcError};
use tracing::debug;

use crate::brush::BrushEngine;
use crate::surface::MaskSurface;

/// The freehand mask painting tool.
///
/// Pointer input arrives normalized to `[0, 1]` and is mapped to pixels
/// against the canvas dimensions. Every completed stroke captures a full
/// snapshot into a linear undo history whose first entry is always the
/// blank canvas.
pub struct MaskCanvas {
    pub(crate) surface: MaskSurface,
    pub(crate) brush: BrushEngine,
    pub(crate) history: SnapshotHistory,
    pub(crate) stroking: bool,
}

impl MaskCanvas {
    /// Create a blank canvas matching the displayed image dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let surface = MaskSurface::new(width, height);
        let history = SnapshotHistory::new(surface.snapshot());
        Self {
            surface,
            brush: BrushEngine::default(),
            history,
            stroking: false,
        }
    }

    /// Current brush diameter in pixels
    pub fn brush_size(&self) -> f32 {
        self.brush.size()
    }

    /// Set the brush diameter, clamped to the allowed range
    pub fn set_brush_size(&mut self, size: f32) {
        self.brush.set_size(size);
    }

    /// True when nothing has been painted
    pub fn is_blank(&self) -> bool {
        self.surface.is_blank()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Clear the canvas and reset the history to a single blank entry
    pub fn reset(&mut self) {
        debug!("Resetting mask canvas");
        self.surface.clear();
        self.history = SnapshotHistory::new(self.surface.snapshot());
        self.stroking = false;
    }

    /// Current mask as a PNG payload, or None when the canvas is blank
    pub fn current_mask(&self) -> Result<Option<DataUri>, IpcError> {
        if self.surface.is_blank() {
            return Ok(None);
        }
        Ok(Some(self.surface.to_data_uri()?))
    }

    /// Map a normalized coordinate to surface pixels
    pub(crate) fn to_pixels(&self, nx: f32, ny: f32) -> (f32, f32) {
        (
            nx.clamp(0.0, 1.0) * self.surface.width as f32,
            ny.clamp(0.0, 1.0) * self.surface.height as f32,
        )
    }
}
