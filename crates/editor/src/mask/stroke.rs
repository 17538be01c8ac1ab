//! Stroke handling for the mask canvas

use lumina_ipc::{DataUri, IpcError};
use tracing::debug;

use super::MaskCanvas;

impl MaskCanvas {
    /// Begin a stroke at a normalized pointer position.
    ///
    /// Stamps the first dab immediately so a click with no movement
    /// still marks the mask.
    pub fn begin_stroke(&mut self, nx: f32, ny: f32) {
        if self.stroking {
            debug!("begin_stroke while already stroking; restarting");
        }
        self.stroking = true;
        self.brush.begin_stroke();

        let (x, y) = self.to_pixels(nx, ny);
        for dab in self.brush.stroke_to(x, y) {
            self.surface.stamp_dab(dab.x, dab.y, dab.radius);
        }
    }

    /// Continue the active stroke. Ignored when no stroke is active.
    pub fn stroke_to(&mut self, nx: f32, ny: f32) {
        if !self.stroking {
            return;
        }
        let (x, y) = self.to_pixels(nx, ny);
        for dab in self.brush.stroke_to(x, y) {
            self.surface.stamp_dab(dab.x, dab.y, dab.radius);
        }
    }

    /// Finish the active stroke.
    ///
    /// Captures a snapshot into the undo history (discarding any redo
    /// entries) and returns the mask to emit: the painted canvas as a
    /// PNG payload, or None when the canvas is blank.
    pub fn end_stroke(&mut self) -> Result<Option<DataUri>, IpcError> {
        if !self.stroking {
            return self.current_mask();
        }
        self.stroking = false;
        self.brush.end_stroke();
        self.history.push(self.surface.snapshot());
        self.current_mask()
    }
}
