//! Editing surface
//!
//! Composes the box selection tool and the mask canvas behind a single
//! pointer interface. The two tools are mutually exclusive: activating
//! one clears the other, so at most one kind of selection exists at any
//! time.

use lumina_ipc::{DataUri, IpcError, SelectionBox, SelectionMode};
use tracing::debug;

use crate::geometry::BoxSelectTool;
use crate::mask::MaskCanvas;

/// The region the next generation should focus on
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No region; changes apply to the whole image
    None,
    /// A rectangular region in normalized coordinates
    Box(SelectionBox),
    /// A painted mask, encoded as a PNG payload
    Mask(DataUri),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Pointer-driven editing state for one loaded image
pub struct EditingSurface {
    select_enabled: bool,
    mode: SelectionMode,
    box_tool: BoxSelectTool,
    mask: MaskCanvas,
    /// Mask payload emitted by the last stroke or history step
    mask_uri: Option<DataUri>,
}

impl EditingSurface {
    /// Create a surface for an image displayed at the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            select_enabled: false,
            mode: SelectionMode::Box,
            box_tool: BoxSelectTool::new(),
            mask: MaskCanvas::new(width, height),
            mask_uri: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn select_enabled(&self) -> bool {
        self.select_enabled
    }

    /// Switch selection tools.
    ///
    /// Moving to box selection wipes the painted mask and its undo
    /// history; moving to brush drops the box selection. Either way the
    /// previous tool's output is gone.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode == self.mode {
            return;
        }
        debug!("Switching selection mode to {:?}", mode);
        self.mode = mode;
        match mode {
            SelectionMode::Box => {
                self.mask.reset();
                self.mask_uri = None;
            }
            SelectionMode::Brush => {
                self.box_tool.clear();
            }
        }
    }

    /// Enable or disable selection editing.
    ///
    /// Disabling drops any box selection but keeps the painted mask.
    pub fn set_select_enabled(&mut self, enabled: bool) {
        self.select_enabled = enabled;
        if !enabled {
            self.box_tool.clear();
        }
    }

    pub fn brush_size(&self) -> f32 {
        self.mask.brush_size()
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.mask.set_brush_size(size);
    }

    pub fn can_undo(&self) -> bool {
        self.mask.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.mask.can_redo()
    }

    /// Pointer pressed at a normalized position
    pub fn pointer_down(&mut self, nx: f32, ny: f32) {
        if !self.select_enabled {
            return;
        }
        match self.mode {
            SelectionMode::Box => self.box_tool.begin(nx, ny),
            SelectionMode::Brush => self.mask.begin_stroke(nx, ny),
        }
    }

    /// Pointer moved while pressed
    pub fn pointer_move(&mut self, nx: f32, ny: f32) {
        if !self.select_enabled {
            return;
        }
        match self.mode {
            SelectionMode::Box => self.box_tool.drag_to(nx, ny),
            SelectionMode::Brush => self.mask.stroke_to(nx, ny),
        }
    }

    /// Pointer released, committing the gesture
    pub fn pointer_up(&mut self) -> Result<(), IpcError> {
        if !self.select_enabled {
            return Ok(());
        }
        match self.mode {
            SelectionMode::Box => {
                self.box_tool.finish();
            }
            SelectionMode::Brush => {
                self.mask_uri = self.mask.end_stroke()?;
            }
        }
        Ok(())
    }

    /// Undo the last mask stroke. Only meaningful in brush mode.
    pub fn undo(&mut self) -> Result<(), IpcError> {
        self.mask_uri = self.mask.undo()?;
        Ok(())
    }

    /// Redo the last undone mask stroke
    pub fn redo(&mut self) -> Result<(), IpcError> {
        self.mask_uri = self.mask.redo()?;
        Ok(())
    }

    /// The live box rectangle during a drag, for rendering feedback
    pub fn box_preview(&self) -> Option<SelectionBox> {
        self.box_tool.preview()
    }

    /// The current selection: a mask if one is painted, a box if one is
    /// committed, otherwise none. The mode switch rules guarantee the
    /// two cannot coexist.
    pub fn selection(&self) -> Selection {
        if let Some(uri) = &self.mask_uri {
            return Selection::Mask(uri.clone());
        }
        if let Some(b) = self.box_tool.selection() {
            return Selection::Box(b);
        }
        Selection::None
    }

    /// Drop every selection: box, mask and mask history
    pub fn clear_selection(&mut self) {
        self.box_tool.clear();
        self.mask.reset();
        self.mask_uri = None;
    }
}
