//! Touch events as delivered by the host view.

use crate::domain::Point;
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    /// The platform took the gesture away (system gesture, interruption).
    Cancel,
}

/// A touch event with the points currently in contact.
///
/// Only the first point is tracked; additional fingers are ignored. End and
/// cancel events usually carry no points.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<Point>,
}

impl TouchEvent {
    #[must_use]
    pub fn start(point: Point) -> Self {
        Self {
            phase: TouchPhase::Start,
            touches: vec![point],
        }
    }

    #[must_use]
    pub fn moved(point: Point) -> Self {
        Self {
            phase: TouchPhase::Move,
            touches: vec![point],
        }
    }

    #[must_use]
    pub const fn end() -> Self {
        Self {
            phase: TouchPhase::End,
            touches: Vec::new(),
        }
    }

    #[must_use]
    pub const fn cancel() -> Self {
        Self {
            phase: TouchPhase::Cancel,
            touches: Vec::new(),
        }
    }

    /// The tracked touch point, if the event carries any.
    #[must_use]
    pub fn primary(&self) -> Option<Point> {
        self.touches.first().copied()
    }
}

/// Whether a handler claimed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Propagation {
    /// Native handling (scrolling, clicks) proceeds.
    #[default]
    Ignored,
    /// The host must suppress default scrolling for this event.
    Consumed,
}

impl Propagation {
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }

    /// `Consumed` if either side consumed.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        if self.is_consumed() || other.is_consumed() {
            Self::Consumed
        } else {
            Self::Ignored
        }
    }
}

/// A listener's response to one event.
///
/// `task` carries asynchronous work the listener started (a refresh). The host
/// must drive it to completion on its executor; dropping it cancels the work.
#[derive(Default)]
pub struct Dispatch {
    pub propagation: Propagation,
    pub task: Option<LocalBoxFuture<'static, ()>>,
}

impl Dispatch {
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_propagation(propagation: Propagation) -> Self {
        Self {
            propagation,
            task: None,
        }
    }

    #[must_use]
    pub fn with_task(task: LocalBoxFuture<'static, ()>) -> Self {
        Self {
            propagation: Propagation::Ignored,
            task: Some(task),
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("propagation", &self.propagation)
            .field("has_task", &self.task.is_some())
            .finish()
    }
}
