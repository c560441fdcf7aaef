//! Swipe navigator state and its render-facing snapshot.

use crate::domain::{AxisLock, Point, SwipeDirection};
use serde::Serialize;

/// Mutable state of one navigator.
///
/// `current_index` persists across gestures; everything else is transient and
/// reset at every gesture start and end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeState {
    pub current_index: usize,
    /// Signed displacement of the in-progress drag, after edge resistance.
    pub swipe_offset: f32,
    pub is_swiping: bool,
    pub axis: AxisLock,
    pub start: Option<Point>,
}

impl SwipeState {
    /// Clears everything except `current_index`.
    pub fn reset_gesture(&mut self) {
        *self = Self {
            current_index: self.current_index,
            ..Self::default()
        };
    }
}

/// What a released gesture did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SwipeOutcome {
    /// The carousel moved one item.
    Committed {
        direction: SwipeDirection,
        index: usize,
    },
    /// A horizontal drag that was too short, pushed past an edge, or cancelled.
    Discarded,
    /// The finger never left the axis-lock slop; left to click handling.
    Tap,
    /// The gesture locked vertical and belonged to native scrolling.
    Scrolled,
}

/// Read-only view of a navigator for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwipeSnapshot {
    pub current_index: usize,
    pub item_count: usize,
    pub swipe_offset: f32,
    pub is_swiping: bool,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}
