use serde::{Deserialize, Serialize};

/// The visible window onto the world.
///
/// `scroll_y` is the world y of the top edge of the screen. Only the
/// vertical axis scrolls; horizontally the world is exactly one screen
/// wide and wraps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Scroll so that `y` sits at the vertical center of the screen.
    pub fn center_on(&mut self, y: f32) {
        self.scroll_y = y - self.height / 2.0;
    }

    /// Follow `target_y`, leaving it free to move inside a band of
    /// `deadzone` units around the screen center before scrolling.
    pub fn follow(&mut self, target_y: f32, deadzone: f32) {
        if !target_y.is_finite() {
            return;
        }
        let half_dz = deadzone.max(0.0) / 2.0;
        let mid = self.scroll_y + self.height / 2.0;
        if target_y < mid - half_dz {
            self.scroll_y = target_y + half_dz - self.height / 2.0;
        } else if target_y > mid + half_dz {
            self.scroll_y = target_y - half_dz - self.height / 2.0;
        }
    }
}
