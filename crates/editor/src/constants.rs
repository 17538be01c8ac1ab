//! Editing constants

/// Smallest selectable brush diameter in pixels
pub const MIN_BRUSH_SIZE: f32 = 5.0;

/// Largest selectable brush diameter in pixels
pub const MAX_BRUSH_SIZE: f32 = 100.0;

/// Brush diameter when a session starts
pub const DEFAULT_BRUSH_SIZE: f32 = 30.0;

/// Mask stroke color: translucent indigo, RGBA
pub const MASK_STROKE_COLOR: [u8; 4] = [99, 102, 241, 128];

/// Dab spacing as a fraction of brush diameter
pub const DAB_SPACING: f32 = 0.25;
