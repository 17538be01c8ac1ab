//! Lumina editing engine
//!
//! Interactive editing tools that run between image upload and
//! generation: rectangular box selection, freehand mask painting with
//! snapshot undo, the before/after comparison slider, and the editing
//! surface that composes them.
//!
//! All tool input arrives as normalized pointer coordinates in `[0, 1]`
//! relative to the displayed image; the mask canvas maps them to pixels
//! internally.

pub mod brush;
pub mod constants;
pub mod geometry;
pub mod mask;
pub mod slider;
pub mod surface;
pub mod workspace;

pub use brush::{BrushEngine, Dab};
pub use geometry::BoxSelectTool;
pub use mask::MaskCanvas;
pub use slider::ComparisonSlider;
pub use surface::MaskSurface;
pub use workspace::{EditingSurface, Selection};
