use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box of `width` x `height` centered on `(x, y)`.
    pub fn from_center(x: f32, y: f32, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            left: x - half_w,
            top: y - half_h,
            right: x + half_w,
            bottom: y + half_h,
        }
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.right <= other.left
            || self.left >= other.right
            || self.bottom <= other.top
            || self.top >= other.bottom)
    }

    /// Whether the horizontal extents of the two boxes intersect.
    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.right > other.left && self.left < other.right
    }
}
