//! Coordinates, drag directions and the per-gesture axis lock.

use serde::{Deserialize, Serialize};

/// A touch point in logical pixels, relative to the gesture surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self` as `(dx, dy)`.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Direction the finger travelled during a committed swipe.
///
/// Dragging right reveals the previous item, dragging left the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of a signed horizontal offset. Zero has no direction.
    #[must_use]
    pub fn from_offset(offset: f32) -> Option<Self> {
        if offset > 0.0 {
            Some(Self::Right)
        } else if offset < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }
}

/// Axis decision made once per gesture, after the finger leaves the lock slop.
///
/// A `Horizontal` gesture belongs to the carousel; a `Vertical` one is left to
/// native scrolling for the rest of the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisLock {
    #[default]
    Undetermined,
    Horizontal,
    Vertical,
}

impl AxisLock {
    /// Resolves the lock for a displacement, or stays `Undetermined` while the
    /// larger component is still within `slop`.
    #[must_use]
    pub fn resolve(dx: f32, dy: f32, slop: f32) -> Self {
        let (ax, ay) = (dx.abs(), dy.abs());
        if ax.max(ay) <= slop {
            Self::Undetermined
        } else if ax > ay {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    #[must_use]
    pub const fn is_determined(self) -> bool {
        !matches!(self, Self::Undetermined)
    }
}
