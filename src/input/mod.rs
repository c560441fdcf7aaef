//! Touch input plumbing between a host view and the gesture controllers.
//!
//! # Modules
//!
//! - [`events`]: Touch events, propagation and dispatch results
//! - [`surface`]: Listener registry with scoped subscriptions
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use touchflow::feedback::FeedbackChannel;
//! use touchflow::input::{TouchEvent, TouchSurface};
//! use touchflow::{Point, SwipeNavigator};
//!
//! let surface = TouchSurface::new();
//! let carousel = Rc::new(SwipeNavigator::new(3, FeedbackChannel::silent())?);
//! let _subscription = surface.attach(carousel.clone());
//!
//! surface.dispatch(&TouchEvent::start(Point::new(200.0, 10.0)));
//! let response = surface.dispatch(&TouchEvent::moved(Point::new(120.0, 12.0)));
//! assert!(response.default_prevented);
//! surface.dispatch(&TouchEvent::end());
//!
//! assert_eq!(carousel.current_index(), 1);
//! # Ok::<(), touchflow::TouchflowError>(())
//! ```

pub mod events;
pub mod surface;

pub use events::{Dispatch, Propagation, TouchEvent, TouchPhase};
pub use surface::{Subscription, SurfaceResponse, TouchListener, TouchSurface};
