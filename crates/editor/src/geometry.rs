//! Rectangular box selection tool
//!
//! Tracks a drag gesture in normalized coordinates and produces a
//! [`SelectionBox`] whose origin is always the minimum corner, whatever
//! direction the user dragged in.

use lumina_ipc::SelectionBox;
use tracing::debug;

/// Drag state for the box selection tool
#[derive(Debug, Default)]
pub struct BoxSelectTool {
    /// Drag anchor, set on pointer-down
    anchor: Option<(f32, f32)>,
    /// Latest pointer position during the drag
    current: Option<(f32, f32)>,
    /// The committed selection, if any
    selection: Option<SelectionBox>,
}

impl BoxSelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at a normalized position, replacing any existing
    /// selection
    pub fn begin(&mut self, nx: f32, ny: f32) {
        let p = (nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0));
        self.anchor = Some(p);
        self.current = Some(p);
        self.selection = None;
    }

    /// Update the drag. Ignored when no drag is active.
    pub fn drag_to(&mut self, nx: f32, ny: f32) {
        if self.anchor.is_none() {
            return;
        }
        self.current = Some((nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0)));
    }

    /// Finish the drag and commit the selection.
    ///
    /// A degenerate drag (no area) commits no selection. Returns the
    /// committed box, if any.
    pub fn finish(&mut self) -> Option<SelectionBox> {
        let anchor = self.anchor.take()?;
        let current = self.current.take()?;

        let selection = SelectionBox::from_corners(anchor.0, anchor.1, current.0, current.1);
        if selection.is_empty() {
            debug!("Discarding degenerate box selection");
            self.selection = None;
        } else {
            self.selection = Some(selection);
        }
        self.selection
    }

    /// The live rectangle during a drag, for rendering feedback
    pub fn preview(&self) -> Option<SelectionBox> {
        let (anchor, current) = (self.anchor?, self.current?);
        Some(SelectionBox::from_corners(
            anchor.0, anchor.1, current.0, current.1,
        ))
    }

    /// The committed selection, if any
    pub fn selection(&self) -> Option<SelectionBox> {
        self.selection
    }

    /// Drop the selection and any in-progress drag
    pub fn clear(&mut self) {
        self.anchor = None;
        self.current = None;
        self.selection = None;
    }
}
