//! Viewport geometry for counter visibility checks.
//!
//! Model:
//! - The host reports the viewport dimensions and each counter's bounding
//!   box in viewport coordinates (top-left origin, y grows downward).
//! - A box counts as visible only when it lies entirely inside the
//!   viewport: all four edges within [0, width] x [0, height]. Partial
//!   visibility does not count.

use serde::{Deserialize, Serialize};

/// Visible region of the page, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        // Zero-sized until the host reports real dimensions; nothing is
        // fully visible inside a zero viewport.
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Axis-aligned bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whole-box containment test: every edge inside the viewport.
    pub fn fully_within(&self, vp: &Viewport) -> bool {
        self.top >= 0.0 && self.left >= 0.0 && self.bottom() <= vp.height && self.right() <= vp.width
    }
}
