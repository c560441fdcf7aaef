//! Touchflow: touch-gesture state machines for carousels and pull-to-refresh.
//!
//! Touchflow turns raw touch streams into the two interactions a mobile
//! content page needs most:
//! - Horizontal swipe navigation over a fixed carousel, with axis locking,
//!   rubber-band resistance at the edges and a commit threshold
//! - Pull-to-refresh from the top of a scrolled viewport, invoking an
//!   asynchronous refresh exactly once per qualifying gesture
//!
//! Both controllers are synchronous, single-threaded state machines. They do
//! not render anything; hosts read their snapshots to draw offsets and
//! indicators.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host view (or the replay binary, main.rs)          │  ← Touch source
//! └─────────────────────────────────────────────────────┘
//!                        │ TouchEvent
//! ┌─────────────────────────────────────────────────────┐
//! │  Input Layer (input/)                               │  ← Scoped listeners
//! │  - TouchSurface dispatch                            │
//! │  - Subscription guards                              │
//! └─────────────────────────────────────────────────────┘
//!              │                          │
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │ Swipe Layer (swipe/)     │  │ Refresh Layer (refresh/) │
//! │ - Axis lock              │  │ - Top-of-page pull       │
//! │ - Edge resistance        │  │ - Guarded async refresh  │
//! │ - Commit / discard       │  │ - Outcome reporting      │
//! └──────────────────────────┘  └──────────────────────────┘
//!              │                          │
//! ┌─────────────────────────────────────────────────────┐
//! │  Feedback (feedback/)                               │  ← Injected device
//! │  - Haptic patterns, tones                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Config, Infrastructure, Observability      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Points, directions, axis lock, errors
//! - [`config`]: Tuning values loaded from TOML or string maps
//! - [`feedback`]: Haptic/audio capability injected into both controllers
//! - [`input`]: Touch events, gesture surfaces and subscriptions
//! - [`swipe`]: The carousel swipe navigator
//! - [`refresh`]: The pull-to-refresh controller
//! - [`replay`]: Replaying recorded touch sequences
//! - [`infrastructure`]: Config file locations
//! - [`observability`]: Tracing subscriber setup
//!
//! # Examples
//!
//! ```rust
//! use std::rc::Rc;
//! use touchflow::feedback::{FeedbackChannel, NoopFeedback};
//! use touchflow::refresh::PullToRefresh;
//! use touchflow::{Config, Point, SwipeNavigator};
//!
//! let config = Config::default();
//! let feedback = FeedbackChannel::new(Rc::new(NoopFeedback), config.feedback);
//!
//! let carousel = SwipeNavigator::with_config(5, config.swipe, feedback.clone())?;
//! carousel.touch_start(Point::new(300.0, 200.0));
//! carousel.touch_move(Point::new(180.0, 205.0));
//! carousel.touch_end();
//! assert_eq!(carousel.current_index(), 1);
//!
//! let page = PullToRefresh::with_config(config.pull, || 0.0_f32, feedback, || async {
//!     Err::<(), _>("offline")
//! })?;
//! page.touch_start(Point::new(0.0, 0.0));
//! page.touch_move(Point::new(0.0, 250.0));
//! let outcome = pollster::block_on(page.touch_end());
//! assert!(outcome.is_failed());
//! assert!(!page.is_refreshing());
//! # Ok::<(), touchflow::TouchflowError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Injected Capabilities
//!
//! Vibration, tones and the viewport scroll offset are passed in at
//! construction rather than read from globals, so every behavior is testable
//! without a device.
//!
//! ## Shared-Reference Handlers
//!
//! Handlers take `&self` and keep state in `Cell`s. A view and a touch surface
//! can hold the same controller, and touches arriving while a refresh is
//! awaited are handled normally.
//!
//! ## Guaranteed Refresh Cleanup
//!
//! The refreshing flag is owned by a drop guard inside the refresh future. A
//! failed, panicking or abandoned refresh cannot leave the indicator stuck.

pub mod config;
pub mod domain;
pub mod feedback;
pub mod infrastructure;
pub mod input;
pub mod observability;
pub mod refresh;
pub mod replay;
pub mod swipe;

pub use config::{Config, FeedbackConfig, PullConfig, SwipeConfig};
pub use domain::{AxisLock, Point, RefreshError, Result, SwipeDirection, TouchflowError};
pub use feedback::{Feedback, FeedbackChannel, HapticPattern, Tone};
pub use input::{Propagation, Subscription, TouchEvent, TouchPhase, TouchSurface};
pub use refresh::{PullToRefresh, RefreshOutcome};
pub use swipe::{SwipeNavigator, SwipeOutcome};
