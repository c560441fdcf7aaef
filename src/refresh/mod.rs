//! Pull-to-refresh controller.
//!
//! # Modules
//!
//! - `controller`: Gesture handling and the guarded refresh invocation
//! - `state`: Controller state, outcomes and the indicator snapshot

mod controller;
mod state;

pub use controller::{blocking, PullToRefresh, ScrollPosition};
pub use state::{PullSnapshot, PullState, RefreshOutcome};
