//! Before/after comparison slider
//!
//! A divider position in percent, driven by pointer drags against the
//! containing view. Always clamped to `[0, 100]`, so dragging past
//! either edge pins the divider there.

/// Divider state for the before/after comparison view
#[derive(Debug, Clone, Copy)]
pub struct ComparisonSlider {
    /// Divider position in percent of container width
    position: f32,
    dragging: bool,
}

impl Default for ComparisonSlider {
    fn default() -> Self {
        Self {
            position: 50.0,
            dragging: false,
        }
    }
}

impl ComparisonSlider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Divider position in percent, in `[0, 100]`
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Grab the divider
    pub fn press(&mut self) {
        self.dragging = true;
    }

    /// Move the divider to track the pointer.
    ///
    /// `pointer_x` is in the same coordinate space as `container_left`;
    /// positions outside the container clamp to the nearest edge.
    /// Ignored when the divider is not grabbed or the container has no
    /// width.
    pub fn drag_to(&mut self, pointer_x: f32, container_left: f32, container_width: f32) {
        if !self.dragging || container_width <= 0.0 {
            return;
        }
        let fraction = (pointer_x - container_left) / container_width;
        self.position = (fraction * 100.0).clamp(0.0, 100.0);
    }

    /// Release the divider
    pub fn release(&mut self) {
        self.dragging = false;
    }
}
