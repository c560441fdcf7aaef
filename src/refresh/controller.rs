//! Pull-to-refresh gesture interpretation.
//!
//! # Gesture Algorithm
//!
//! 1. **Start**: begin tracking only when the viewport is scrolled exactly to
//!    the top; otherwise the whole gesture is ignored
//! 2. **Move**: a downward drag while still at the top is consumed. The pull
//!    distance is the drag divided by the resistance, capped at
//!    `threshold * max_pull_factor`. A medium haptic fires once, the first time
//!    the distance reaches the threshold
//! 3. **End**: a pull at or past the threshold starts the refresh: the
//!    controller marks itself refreshing, fires a success haptic and invokes
//!    the refresh operation once. The refreshing flag is held by a guard that
//!    clears it however the operation ends, including when the returned future
//!    is dropped before completing
//!
//! While a refresh runs, new gestures do not start and releases are skipped.

use super::state::{PullSnapshot, PullState, RefreshOutcome};
use crate::config::PullConfig;
use crate::domain::{Point, RefreshError};
use crate::feedback::{FeedbackChannel, HapticPattern};
use crate::input::{Dispatch, Propagation, TouchEvent, TouchListener, TouchPhase};
use futures_util::future::{self, LocalBoxFuture, Ready};
use futures_util::FutureExt;
use std::cell::{Cell, RefCell};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// Source of the viewport's vertical scroll offset.
///
/// Implemented for any `Fn() -> f32`, so a closure reading the host's scroll
/// position is enough.
pub trait ScrollPosition {
    fn scroll_top(&self) -> f32;
}

impl<F: Fn() -> f32> ScrollPosition for F {
    fn scroll_top(&self) -> f32 {
        self()
    }
}

type RefreshFn = Box<dyn Fn() -> LocalBoxFuture<'static, Result<(), RefreshError>>>;
type SettledFn = Box<dyn FnMut(&RefreshOutcome)>;

/// Adapts a synchronous refresh operation.
///
/// ```rust
/// use std::convert::Infallible;
/// use touchflow::feedback::FeedbackChannel;
/// use touchflow::refresh::{blocking, PullToRefresh};
///
/// let controller = PullToRefresh::new(
///     || 0.0_f32,
///     FeedbackChannel::silent(),
///     blocking(|| Ok::<(), Infallible>(())),
/// );
/// assert!(!controller.is_refreshing());
/// ```
pub fn blocking<F, E>(f: F) -> impl Fn() -> Ready<Result<(), E>>
where
    F: Fn() -> Result<(), E>,
{
    move || future::ready(f())
}

struct Inner {
    config: PullConfig,
    scroll: Box<dyn ScrollPosition>,
    feedback: FeedbackChannel,
    on_refresh: RefreshFn,
    on_settled: RefCell<Option<SettledFn>>,
    state: Cell<PullState>,
}

impl Inner {
    fn update(&self, f: impl FnOnce(&mut PullState)) {
        let mut state = self.state.get();
        f(&mut state);
        self.state.set(state);
    }

    /// Runs `on_settled` outside its cell, so the callback may start another
    /// gesture. Refreshes settling from inside the callback are not reported.
    fn notify_settled(&self, outcome: &RefreshOutcome) {
        let Some(mut callback) = self.on_settled.borrow_mut().take() else {
            return;
        };

        callback(outcome);

        let mut slot = self.on_settled.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

/// Clears the refreshing flag and the parked indicator when dropped.
struct RefreshGuard {
    inner: Rc<Inner>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.inner.update(|state| {
            state.is_refreshing = false;
            state.reset_gesture();
        });
    }
}

/// Pull-to-refresh controller.
///
/// A cheap, clonable handle: clones share one state, so the view rendering
/// the indicator and the surface delivering touches can each hold one.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use touchflow::feedback::FeedbackChannel;
/// use touchflow::refresh::{PullToRefresh, RefreshOutcome};
/// use touchflow::Point;
///
/// let controller = PullToRefresh::new(
///     || 0.0_f32,
///     FeedbackChannel::silent(),
///     || async { Ok::<(), Infallible>(()) },
/// );
///
/// controller.touch_start(Point::new(0.0, 0.0));
/// controller.touch_move(Point::new(0.0, 300.0));
/// assert_eq!(controller.pull_distance(), 120.0);
///
/// let outcome = pollster::block_on(controller.touch_end());
/// assert!(matches!(outcome, RefreshOutcome::Completed));
/// assert!(!controller.is_refreshing());
/// ```
#[derive(Clone)]
pub struct PullToRefresh {
    inner: Rc<Inner>,
}

impl PullToRefresh {
    /// Creates a controller with default tuning.
    pub fn new<S, F, Fut, E>(scroll: S, feedback: FeedbackChannel, on_refresh: F) -> Self
    where
        S: ScrollPosition + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
        E: Into<Box<dyn StdError + 'static>>,
    {
        Self::build(PullConfig::default(), scroll, feedback, on_refresh)
    }

    /// Creates a controller with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Config`](crate::TouchflowError::Config) when
    /// `config` fails [`PullConfig::validate`].
    pub fn with_config<S, F, Fut, E>(
        config: PullConfig,
        scroll: S,
        feedback: FeedbackChannel,
        on_refresh: F,
    ) -> crate::Result<Self>
    where
        S: ScrollPosition + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
        E: Into<Box<dyn StdError + 'static>>,
    {
        config.validate()?;
        Ok(Self::build(config, scroll, feedback, on_refresh))
    }

    fn build<S, F, Fut, E>(
        config: PullConfig,
        scroll: S,
        feedback: FeedbackChannel,
        on_refresh: F,
    ) -> Self
    where
        S: ScrollPosition + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
        E: Into<Box<dyn StdError + 'static>>,
    {
        let on_refresh: RefreshFn = Box::new(move || {
            on_refresh()
                .map(|result| result.map_err(RefreshError::new))
                .boxed_local()
        });

        Self {
            inner: Rc::new(Inner {
                config,
                scroll: Box::new(scroll),
                feedback,
                on_refresh,
                on_settled: RefCell::new(None),
                state: Cell::new(PullState::default()),
            }),
        }
    }

    /// Registers a callback observing every outcome of a triggered refresh.
    ///
    /// Hosts use it to surface failures (a toast, a banner) when they drive
    /// refreshes through a [`TouchSurface`](crate::input::TouchSurface) and
    /// never see the returned outcome themselves.
    #[must_use]
    pub fn on_settled(self, callback: impl FnMut(&RefreshOutcome) + 'static) -> Self {
        *self.inner.on_settled.borrow_mut() = Some(Box::new(callback));
        self
    }

    pub fn touch_start(&self, point: Point) {
        let inner = &self.inner;

        if inner.state.get().is_refreshing {
            tracing::trace!("refresh in progress, pull ignored");
            return;
        }

        let scroll_top = inner.scroll.scroll_top();
        if scroll_top != 0.0 {
            inner.update(PullState::reset_gesture);
            tracing::trace!(scroll_top, "viewport not at top, pull ignored");
            return;
        }

        inner.update(|state| {
            state.reset_gesture();
            state.start_y = point.y;
            state.is_pulling = true;
        });
        tracing::trace!(start_y = point.y, "pull tracking started");
    }

    /// Tracks the finger. Returns [`Propagation::Consumed`] for downward drags
    /// that move the indicator.
    pub fn touch_move(&self, point: Point) -> Propagation {
        let inner = &self.inner;
        let mut state = inner.state.get();

        if !state.is_pulling || state.is_refreshing {
            return Propagation::Ignored;
        }

        let diff = point.y - state.start_y;
        if diff <= 0.0 || inner.scroll.scroll_top() != 0.0 {
            return Propagation::Ignored;
        }

        let threshold = inner.config.threshold;
        state.pull_distance = (diff / inner.config.resistance).min(inner.config.max_distance());

        if state.pull_distance >= threshold && !state.threshold_reached {
            state.threshold_reached = true;
            inner.feedback.pulse(HapticPattern::Medium);
            tracing::debug!(pull_distance = state.pull_distance, "refresh threshold reached");
        }

        tracing::trace!(diff, pull_distance = state.pull_distance, "pull updated");
        inner.state.set(state);
        Propagation::Consumed
    }

    /// Releases the gesture.
    ///
    /// When the pull qualifies, the refresh operation is invoked before this
    /// returns and the returned future resolves once it settles. Dropping the
    /// future early abandons the operation and clears the refreshing state.
    pub fn touch_end(&self) -> LocalBoxFuture<'static, RefreshOutcome> {
        let _span = tracing::debug_span!("pull_touch_end").entered();
        let inner = &self.inner;
        let state = inner.state.get();

        if state.is_refreshing {
            inner.update(|state| state.is_pulling = false);
            tracing::debug!("release during refresh skipped");
            return future::ready(RefreshOutcome::Skipped).boxed_local();
        }

        if !self.release_will_refresh() {
            inner.update(PullState::reset_gesture);
            return future::ready(RefreshOutcome::Skipped).boxed_local();
        }

        inner.update(|state| {
            state.is_refreshing = true;
            state.is_pulling = false;
        });
        let guard = RefreshGuard {
            inner: Rc::clone(inner),
        };

        inner.feedback.pulse(HapticPattern::Success);
        tracing::debug!(pull_distance = state.pull_distance, "refresh triggered");

        let pending = (inner.on_refresh)();

        async move {
            let result = pending.await;
            let inner = Rc::clone(&guard.inner);
            drop(guard);

            let outcome = match result {
                Ok(()) => {
                    tracing::debug!("refresh completed");
                    RefreshOutcome::Completed
                }
                Err(err) => {
                    tracing::warn!(error = %err, "refresh failed");
                    RefreshOutcome::Failed(err)
                }
            };

            inner.notify_settled(&outcome);
            outcome
        }
        .boxed_local()
    }

    /// Abandons the gesture without refreshing.
    pub fn touch_cancel(&self) {
        let inner = &self.inner;
        if inner.state.get().is_refreshing {
            inner.update(|state| state.is_pulling = false);
        } else {
            inner.update(PullState::reset_gesture);
        }
    }

    #[must_use]
    pub fn pull_distance(&self) -> f32 {
        self.inner.state.get().pull_distance
    }

    #[must_use]
    pub fn is_pulling(&self) -> bool {
        self.inner.state.get().is_pulling
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.inner.state.get().is_refreshing
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        (self.pull_distance() / self.inner.config.threshold).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn config(&self) -> PullConfig {
        self.inner.config
    }

    /// Whether releasing now would start a refresh.
    #[must_use]
    pub fn release_will_refresh(&self) -> bool {
        let state = self.inner.state.get();
        state.is_pulling && !state.is_refreshing && state.pull_distance >= self.inner.config.threshold
    }

    #[must_use]
    pub fn snapshot(&self) -> PullSnapshot {
        let state = self.inner.state.get();
        PullSnapshot {
            pull_distance: state.pull_distance,
            progress: self.progress(),
            is_pulling: state.is_pulling,
            is_refreshing: state.is_refreshing,
        }
    }
}

impl TouchListener for PullToRefresh {
    fn on_touch(&self, event: &TouchEvent) -> Dispatch {
        match (event.phase, event.primary()) {
            (TouchPhase::Start, Some(point)) => {
                self.touch_start(point);
                Dispatch::ignored()
            }
            (TouchPhase::Move, Some(point)) => Dispatch::from_propagation(self.touch_move(point)),
            (TouchPhase::End, _) => {
                if self.release_will_refresh() {
                    Dispatch::with_task(self.touch_end().map(drop).boxed_local())
                } else {
                    let skipped = self.touch_end().now_or_never();
                    debug_assert!(matches!(skipped, Some(RefreshOutcome::Skipped)));
                    Dispatch::ignored()
                }
            }
            (TouchPhase::Cancel, _) => {
                self.touch_cancel();
                Dispatch::ignored()
            }
            (TouchPhase::Start | TouchPhase::Move, None) => Dispatch::ignored(),
        }
    }
}

impl fmt::Debug for PullToRefresh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullToRefresh")
            .field("config", &self.inner.config)
            .field("state", &self.inner.state.get())
            .finish_non_exhaustive()
    }
}
