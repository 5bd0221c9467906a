use serde::{Deserialize, Serialize};

use crate::WeldLabel;

/// Pixel-space box as stored upstream. Coordinates may fall outside the
/// image; call [`BoundingBox::clamp`] once the image size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_left: i64,
    pub y_top: i64,
    pub x_right: i64,
    pub y_bottom: i64,
}

impl BoundingBox {
    pub fn new(x_left: i64, y_top: i64, x_right: i64, y_bottom: i64) -> Self {
        Self {
            x_left,
            y_top,
            x_right,
            y_bottom,
        }
    }

    /// Restricts the box to `[0, width] x [0, height]`.
    ///
    /// An inverted pair collapses onto its left (or top) edge, so the result
    /// always satisfies `0 <= x_left <= x_right <= width` and likewise for y.
    pub fn clamp(&self, width: u32, height: u32) -> Self {
        let (x_left, x_right) = clamp_span(self.x_left, self.x_right, i64::from(width));
        let (y_top, y_bottom) = clamp_span(self.y_top, self.y_bottom, i64::from(height));
        Self {
            x_left,
            y_top,
            x_right,
            y_bottom,
        }
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.clamp(width, height) == *self
    }
}

fn clamp_span(start: i64, end: i64, extent: i64) -> (i64, i64) {
    let start = start.clamp(0, extent);
    let end = end.clamp(0, extent).max(start);
    (start, end)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub label: WeldLabel,
    pub bounds: BoundingBox,
    pub reviewed: bool,
}
