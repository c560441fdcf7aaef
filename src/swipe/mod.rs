//! Swipe navigator for carousels.
//!
//! # Modules
//!
//! - `navigator`: Gesture handling and imperative navigation
//! - `state`: Navigator state, gesture outcomes and the render snapshot

mod navigator;
mod state;

pub use navigator::SwipeNavigator;
pub use state::{SwipeOutcome, SwipeSnapshot, SwipeState};
