//! Selection, style and history types shared across crates

use serde::{Deserialize, Serialize};

use crate::DataUri;

/// A normalized rectangular selection in image-fraction coordinates.
///
/// All fields lie in `[0, 1]`: `(x, y)` is the top-left corner and
/// `width`/`height` are non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SelectionBox {
    /// Build a normalized box from two opposite corners, in any drag
    /// direction. The result always has the minimum corner as origin and
    /// non-negative extents.
    pub fn from_corners(ax: f32, ay: f32, bx: f32, by: f32) -> Self {
        Self {
            x: ax.min(bx),
            y: ay.min(by),
            width: (bx - ax).abs(),
            height: (by - ay).abs(),
        }
    }

    /// True when the box has no visible area
    pub fn is_empty(&self) -> bool {
        self.width <= f32::EPSILON || self.height <= f32::EPSILON
    }
}

/// Which selection tool is active on the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Rectangular drag selection
    Box,
    /// Freehand mask painting
    Brush,
}

/// Interior design styles offered by the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStyle {
    Modern,
    Minimalist,
    Scandinavian,
    Bohemian,
    Industrial,
    Japandi,
    MidCenturyModern,
    Luxury,
    Cyberpunk,
}

impl DesignStyle {
    /// Wording used when composing generation instructions
    pub fn as_prompt_str(&self) -> &'static str {
        match self {
            Self::Modern => "Modern",
            Self::Minimalist => "Minimalist",
            Self::Scandinavian => "Scandinavian",
            Self::Bohemian => "Bohemian",
            Self::Industrial => "Industrial",
            Self::Japandi => "Japandi",
            Self::MidCenturyModern => "Mid-Century Modern",
            Self::Luxury => "Modern Luxury",
            Self::Cyberpunk => "Cyberpunk",
        }
    }
}

impl std::fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_prompt_str())
    }
}

/// A completed generation kept in the session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignHistoryItem {
    /// Unique id, derived from the creation timestamp
    pub id: String,
    pub original_image: DataUri,
    pub generated_image: DataUri,
    pub prompt: String,
    pub style: DesignStyle,
    /// Unix epoch milliseconds at creation time
    pub timestamp_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_corners_normalizes_all_drag_directions() {
        let expected = SelectionBox {
            x: 0.2,
            y: 0.3,
            width: 0.4,
            height: 0.2,
        };

        // top-left to bottom-right
        assert_eq!(SelectionBox::from_corners(0.2, 0.3, 0.6, 0.5), expected);
        // bottom-right to top-left
        assert_eq!(SelectionBox::from_corners(0.6, 0.5, 0.2, 0.3), expected);
        // top-right to bottom-left
        assert_eq!(SelectionBox::from_corners(0.6, 0.3, 0.2, 0.5), expected);
        // bottom-left to top-right
        assert_eq!(SelectionBox::from_corners(0.2, 0.5, 0.6, 0.3), expected);
    }

    #[test]
    fn test_degenerate_box_is_empty() {
        assert!(SelectionBox::from_corners(0.5, 0.5, 0.5, 0.5).is_empty());
        assert!(SelectionBox::from_corners(0.1, 0.5, 0.9, 0.5).is_empty());
        assert!(!SelectionBox::from_corners(0.1, 0.1, 0.2, 0.2).is_empty());
    }

    #[test]
    fn test_style_prompt_wording() {
        assert_eq!(
            DesignStyle::MidCenturyModern.to_string(),
            "Mid-Century Modern"
        );
        assert_eq!(DesignStyle::Luxury.to_string(), "Modern Luxury");
    }
}
