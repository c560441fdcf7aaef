//! Structured logging for the gesture controllers and the replay tool.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! host's decision. Hosts without their own subscriber, and the
//! `touchflow-replay` binary, call [`init_tracing`].
//!
//! # Levels
//!
//! - `debug`: gesture decisions (axis locks, commits, refresh start/finish)
//! - `trace`: per-move offsets and ignored input
//! - `warn`: refresh failures
//!
//! # Configuration
//!
//! The filter is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
