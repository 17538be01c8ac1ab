//! Brush engine for dab generation
//!
//! Interpolates pointer input into evenly spaced dabs so fast strokes
//! paint a continuous line instead of scattered spots.

use tracing::debug;

use crate::constants::{DAB_SPACING, DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};

/// A single brush stamp in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dab {
    pub x: f32,
    pub y: f32,
    /// Stamp radius in pixels
    pub radius: f32,
}

/// Brush engine that generates dabs from pointer input
///
/// Dabs are placed along the pointer path at a fixed fraction of the
/// brush diameter, carrying leftover distance between segments.
pub struct BrushEngine {
    /// Brush diameter in pixels
    size: f32,
    /// Last position (None if stroke not started)
    last_pos: Option<(f32, f32)>,
    /// Accumulated distance since last dab
    distance_accumulator: f32,
}

impl Default for BrushEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_SIZE)
    }
}

impl BrushEngine {
    /// Create a brush engine with the given diameter, clamped to the
    /// allowed range
    pub fn new(size: f32) -> Self {
        Self {
            size: size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            last_pos: None,
            distance_accumulator: 0.0,
        }
    }

    /// Current brush diameter in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Set the brush diameter, clamped to the allowed range
    pub fn set_size(&mut self, size: f32) {
        self.size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    /// Start a new stroke
    pub fn begin_stroke(&mut self) {
        self.last_pos = None;
        self.distance_accumulator = 0.0;
    }

    /// Process pointer input and generate dabs along the path.
    ///
    /// The first call of a stroke always produces one dab at the pointer
    /// position, so a click with no movement still marks the mask.
    pub fn stroke_to(&mut self, x: f32, y: f32) -> Vec<Dab> {
        let radius = self.size / 2.0;
        let mut dabs = Vec::new();

        let Some((last_x, last_y)) = self.last_pos else {
            self.last_pos = Some((x, y));
            self.distance_accumulator = 0.0;
            debug!("BrushEngine: first dab at ({:.1}, {:.1})", x, y);
            dabs.push(Dab { x, y, radius });
            return dabs;
        };

        let dx = x - last_x;
        let dy = y - last_y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < 0.001 {
            return dabs;
        }

        let spacing_distance = (self.size * DAB_SPACING).max(0.001);
        self.distance_accumulator += distance;

        // Place dabs at spacing intervals along the segment
        let mut last_dab = None;
        let mut dab_at = spacing_distance - (self.distance_accumulator - distance);
        if dab_at < 0.0 {
            dab_at = 0.0;
        }

        while dab_at <= distance {
            let t = dab_at / distance;
            dabs.push(Dab {
                x: last_x + dx * t,
                y: last_y + dy * t,
                radius,
            });
            last_dab = Some(dab_at);
            dab_at += spacing_distance;
        }

        // Rebase the carry-over only when a dab landed; dab-less
        // segments keep accumulating so slow drags still paint
        if let Some(at) = last_dab {
            self.distance_accumulator = (distance - at).max(0.0);
        }
        self.last_pos = Some((x, y));

        dabs
    }

    /// End the current stroke
    pub fn end_stroke(&mut self) {
        self.last_pos = None;
        self.distance_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_clamped() {
        assert_eq!(BrushEngine::new(1.0).size(), MIN_BRUSH_SIZE);
        assert_eq!(BrushEngine::new(500.0).size(), MAX_BRUSH_SIZE);

        let mut engine = BrushEngine::default();
        assert_eq!(engine.size(), DEFAULT_BRUSH_SIZE);
        engine.set_size(0.0);
        assert_eq!(engine.size(), MIN_BRUSH_SIZE);
    }

    #[test]
    fn test_first_dab_at_start() {
        let mut engine = BrushEngine::default();
        engine.begin_stroke();

        let dabs = engine.stroke_to(100.0, 100.0);
        assert_eq!(dabs.len(), 1);
        assert!((dabs[0].x - 100.0).abs() < 0.001);
        assert!((dabs[0].y - 100.0).abs() < 0.001);
        assert!((dabs[0].radius - DEFAULT_BRUSH_SIZE / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_interpolation_spacing() {
        // 40px brush, spacing 0.25 = dab every 10px
        let mut engine = BrushEngine::new(40.0);
        engine.begin_stroke();

        let dabs = engine.stroke_to(0.0, 0.0);
        assert_eq!(dabs.len(), 1);

        let dabs = engine.stroke_to(50.0, 0.0);
        assert!(dabs.len() >= 4 && dabs.len() <= 6);
    }

    #[test]
    fn test_slow_drag_accumulates_across_moves() {
        // 40px brush, spacing 0.25 = dab every 10px
        let mut engine = BrushEngine::new(40.0);
        engine.begin_stroke();
        engine.stroke_to(0.0, 0.0);

        // 30 moves of 4px each: 120px of travel in sub-spacing steps
        let mut dabs = 0;
        for i in 1..=30 {
            dabs += engine.stroke_to(i as f32 * 4.0, 0.0).len();
        }
        assert!(
            (11..=13).contains(&dabs),
            "expected ~12 dabs over 120px, got {dabs}"
        );
    }

    #[test]
    fn test_no_dabs_for_small_movement() {
        let mut engine = BrushEngine::new(40.0);
        engine.begin_stroke();
        engine.stroke_to(0.0, 0.0);

        let dabs = engine.stroke_to(3.0, 0.0);
        assert!(dabs.is_empty());
    }

    #[test]
    fn test_end_stroke_resets() {
        let mut engine = BrushEngine::default();
        engine.begin_stroke();
        engine.stroke_to(0.0, 0.0);
        engine.stroke_to(50.0, 0.0);
        engine.end_stroke();

        engine.begin_stroke();
        let dabs = engine.stroke_to(200.0, 200.0);
        assert_eq!(dabs.len(), 1);
    }
}
