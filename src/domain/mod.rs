//! Domain layer for touchflow.
//!
//! This module contains the core value types shared by both gesture
//! controllers, independent of any host UI toolkit.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Touch points, swipe directions and the axis lock
//!
//! # Examples
//!
//! ```
//! use touchflow::domain::{AxisLock, Point};
//!
//! let start = Point::new(200.0, 100.0);
//! let (dx, dy) = Point::new(150.0, 104.0).delta_from(start);
//! assert_eq!(AxisLock::resolve(dx, dy, 10.0), AxisLock::Horizontal);
//! ```

pub mod error;
pub mod geometry;

pub use error::{RefreshError, Result, TouchflowError};
pub use geometry::{AxisLock, Point, SwipeDirection};
