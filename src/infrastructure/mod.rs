//! Infrastructure layer for filesystem and environment interactions.
//!
//! The gesture controllers never touch the filesystem; only configuration
//! loading and the replay tool use these helpers.

pub mod paths;

pub use paths::{config_dir, default_config_file, expand_tilde};
