//! Flyout anchoring against the viewport edge

use serde::Deserialize;

/// Which side a third-level flyout opens toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    /// Opens rightward from its parent entry
    #[default]
    Right,
    /// Opens leftward from its parent entry
    Left,
}

/// Horizontal geometry of a flyout at its natural (rightward) position, in
/// viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyoutRect {
    /// Left edge
    pub left: f64,
    /// Rendered width
    pub width: f64,
}

impl FlyoutRect {
    /// Create a rect from its left edge and width.
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Right edge at the natural position.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

impl AnchorSide {
    /// Anchor for a flyout at `rect` in a viewport `viewport_width` wide:
    /// `Left` when the natural right edge would fall outside the viewport.
    pub fn for_viewport(rect: FlyoutRect, viewport_width: f64) -> Self {
        if rect.right() > viewport_width {
            AnchorSide::Left
        } else {
            AnchorSide::Right
        }
    }
}
