//! Horizontal swipe interpretation over a fixed-size carousel.
//!
//! # Gesture Algorithm
//!
//! 1. **Start**: record the start point, mark the gesture active, unlock the axis
//! 2. **Move**: once the finger leaves the lock slop, lock the gesture to the
//!    dominant axis. Horizontal gestures are consumed and track the finger,
//!    damped by the edge resistance when dragging past the first or last item.
//!    Vertical gestures are left to native scrolling.
//! 3. **End**: commit one item in the drag direction when the offset exceeds
//!    the commit threshold and the carousel is not already at that edge. The
//!    transient gesture state always resets.

use super::state::{SwipeOutcome, SwipeSnapshot, SwipeState};
use crate::config::SwipeConfig;
use crate::domain::{AxisLock, Point, Result, SwipeDirection, TouchflowError};
use crate::feedback::{FeedbackChannel, HapticPattern};
use crate::input::{Dispatch, Propagation, TouchEvent, TouchListener, TouchPhase};
use std::cell::{Cell, RefCell};
use std::fmt;

type SwipeCallback = Box<dyn FnMut(SwipeDirection, usize)>;

/// Swipe navigator for a carousel of `item_count` items.
///
/// Handlers take `&self` so a navigator can be shared between the view that
/// renders it and the [`TouchSurface`](crate::input::TouchSurface) feeding it.
///
/// # Example
///
/// ```rust
/// use touchflow::feedback::FeedbackChannel;
/// use touchflow::{Point, SwipeNavigator, SwipeOutcome};
///
/// let carousel = SwipeNavigator::new(4, FeedbackChannel::silent())?;
/// carousel.go_to(1);
///
/// carousel.touch_start(Point::new(200.0, 300.0));
/// carousel.touch_move(Point::new(120.0, 302.0));
/// assert!(matches!(carousel.touch_end(), SwipeOutcome::Committed { index: 2, .. }));
/// assert_eq!(carousel.current_index(), 2);
/// # Ok::<(), touchflow::TouchflowError>(())
/// ```
pub struct SwipeNavigator {
    item_count: usize,
    config: SwipeConfig,
    state: Cell<SwipeState>,
    feedback: FeedbackChannel,
    on_swipe: RefCell<Option<SwipeCallback>>,
}

impl SwipeNavigator {
    /// Creates a navigator with default tuning.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::InvalidItemCount`] when `item_count` is zero.
    pub fn new(item_count: usize, feedback: FeedbackChannel) -> Result<Self> {
        Self::with_config(item_count, SwipeConfig::default(), feedback)
    }

    /// Creates a navigator with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::InvalidItemCount`] when `item_count` is zero
    /// and [`TouchflowError::Config`] when `config` fails
    /// [`SwipeConfig::validate`].
    pub fn with_config(
        item_count: usize,
        config: SwipeConfig,
        feedback: FeedbackChannel,
    ) -> Result<Self> {
        if item_count == 0 {
            return Err(TouchflowError::InvalidItemCount(item_count));
        }
        config.validate()?;

        Ok(Self {
            item_count,
            config,
            state: Cell::new(SwipeState::default()),
            feedback,
            on_swipe: RefCell::new(None),
        })
    }

    /// Registers a callback invoked after every committed swipe with the
    /// drag direction and the new index. Imperative navigation never calls it.
    #[must_use]
    pub fn on_swipe(self, callback: impl FnMut(SwipeDirection, usize) + 'static) -> Self {
        *self.on_swipe.borrow_mut() = Some(Box::new(callback));
        self
    }

    pub fn touch_start(&self, point: Point) {
        let _span = tracing::trace_span!("swipe_touch_start", x = point.x, y = point.y).entered();

        self.update(|state| {
            state.reset_gesture();
            state.start = Some(point);
            state.is_swiping = true;
        });
    }

    /// Tracks the finger. Returns [`Propagation::Consumed`] once the gesture
    /// is locked horizontal; the host must then suppress native scrolling.
    pub fn touch_move(&self, point: Point) -> Propagation {
        let mut state = self.state.get();
        let Some(start) = state.start.filter(|_| state.is_swiping) else {
            return Propagation::Ignored;
        };

        let (dx, dy) = point.delta_from(start);

        if state.axis == AxisLock::Undetermined {
            state.axis = AxisLock::resolve(dx, dy, self.config.axis_lock_distance);
            if state.axis.is_determined() {
                tracing::debug!(axis = ?state.axis, dx, dy, "swipe axis locked");
            }
        }

        let propagation = if state.axis == AxisLock::Horizontal {
            state.swipe_offset = self.resisted_offset(state.current_index, dx);
            tracing::trace!(dx, offset = state.swipe_offset, "swipe offset updated");
            Propagation::Consumed
        } else {
            Propagation::Ignored
        };

        self.state.set(state);
        propagation
    }

    /// Finishes the gesture, committing at most one item.
    pub fn touch_end(&self) -> SwipeOutcome {
        let _span = tracing::debug_span!("swipe_touch_end").entered();

        let state = self.state.get();
        self.update(SwipeState::reset_gesture);

        if !state.is_swiping {
            return SwipeOutcome::Discarded;
        }

        match state.axis {
            AxisLock::Undetermined => return SwipeOutcome::Tap,
            AxisLock::Vertical => return SwipeOutcome::Scrolled,
            AxisLock::Horizontal => {}
        }

        if state.swipe_offset.abs() <= self.config.commit_threshold {
            tracing::debug!(offset = state.swipe_offset, "swipe below commit threshold");
            return SwipeOutcome::Discarded;
        }

        let Some(direction) = SwipeDirection::from_offset(state.swipe_offset) else {
            return SwipeOutcome::Discarded;
        };

        let target = match direction {
            SwipeDirection::Right => state.current_index.checked_sub(1),
            SwipeDirection::Left => Some(state.current_index + 1).filter(|i| *i < self.item_count),
        };

        let Some(index) = target else {
            tracing::debug!(?direction, index = state.current_index, "swipe past edge discarded");
            return SwipeOutcome::Discarded;
        };

        self.update(|state| state.current_index = index);
        self.feedback.pulse(HapticPattern::Light);
        tracing::debug!(?direction, from = state.current_index, to = index, "swipe committed");

        self.notify_swipe(direction, index);

        SwipeOutcome::Committed { direction, index }
    }

    /// Abandons the gesture without committing.
    pub fn touch_cancel(&self) {
        if self.state.get().is_swiping {
            tracing::debug!("swipe cancelled");
        }
        self.update(SwipeState::reset_gesture);
    }

    /// Jumps to `index`. Out-of-range or current indices are a no-op.
    ///
    /// Returns whether the index changed.
    pub fn go_to(&self, index: usize) -> bool {
        if index >= self.item_count || index == self.current_index() {
            return false;
        }

        self.update(|state| state.current_index = index);
        self.feedback.pulse(HapticPattern::Light);
        tracing::debug!(index, "navigated");
        true
    }

    pub fn go_next(&self) -> bool {
        self.can_go_next() && self.go_to(self.current_index() + 1)
    }

    pub fn go_prev(&self) -> bool {
        self.can_go_prev() && self.go_to(self.current_index() - 1)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.get().current_index
    }

    #[must_use]
    pub fn swipe_offset(&self) -> f32 {
        self.state.get().swipe_offset
    }

    #[must_use]
    pub fn is_swiping(&self) -> bool {
        self.state.get().is_swiping
    }

    #[must_use]
    pub fn axis(&self) -> AxisLock {
        self.state.get().axis
    }

    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current_index() + 1 < self.item_count
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.current_index() > 0
    }

    #[must_use]
    pub fn snapshot(&self) -> SwipeSnapshot {
        let state = self.state.get();
        SwipeSnapshot {
            current_index: state.current_index,
            item_count: self.item_count,
            swipe_offset: state.swipe_offset,
            is_swiping: state.is_swiping,
            can_go_prev: self.can_go_prev(),
            can_go_next: self.can_go_next(),
        }
    }

    fn resisted_offset(&self, index: usize, dx: f32) -> f32 {
        let past_first = index == 0 && dx > 0.0;
        let past_last = index + 1 == self.item_count && dx < 0.0;

        if past_first || past_last {
            dx / self.config.edge_resistance
        } else {
            dx
        }
    }

    /// Runs `on_swipe` outside its cell, so the callback may drive this
    /// navigator again. Commits made from inside the callback are not reported.
    fn notify_swipe(&self, direction: SwipeDirection, index: usize) {
        let Some(mut callback) = self.on_swipe.borrow_mut().take() else {
            return;
        };

        callback(direction, index);

        let mut slot = self.on_swipe.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }

    fn update(&self, f: impl FnOnce(&mut SwipeState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }
}

impl TouchListener for SwipeNavigator {
    fn on_touch(&self, event: &TouchEvent) -> Dispatch {
        let propagation = match (event.phase, event.primary()) {
            (TouchPhase::Start, Some(point)) => {
                self.touch_start(point);
                Propagation::Ignored
            }
            (TouchPhase::Move, Some(point)) => self.touch_move(point),
            (TouchPhase::End, _) => {
                self.touch_end();
                Propagation::Ignored
            }
            (TouchPhase::Cancel, _) => {
                self.touch_cancel();
                Propagation::Ignored
            }
            (TouchPhase::Start | TouchPhase::Move, None) => Propagation::Ignored,
        };
        Dispatch::from_propagation(propagation)
    }
}

impl fmt::Debug for SwipeNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeNavigator")
            .field("item_count", &self.item_count)
            .field("config", &self.config)
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}
