//! Replay of recorded touch sequences.
//!
//! Tuning thresholds by feel on a device is slow. A replay feeds a recorded
//! (or hand-written) sequence of touches through the same controllers and
//! surfaces a host would use, and reports the state after every step along
//! with every feedback request.
//!
//! # Modules
//!
//! - `script`: Script format and loading
//! - `runner`: Execution and the frame-by-frame report

mod runner;
mod script;

pub use runner::{run, Commit, Frame, ReplayReport};
pub use script::{RefreshBehavior, Script, ScriptEvent};
