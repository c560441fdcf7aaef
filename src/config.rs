//! Tuning values for both gesture controllers.
//!
//! Configuration can come from a TOML file, a TOML string, or a flat string map
//! (for hosts that pass settings as key/value attributes). Every field has a
//! default, so partial documents are fine.
//!
//! # TOML Format
//!
//! ```toml
//! trace_level = "debug"
//!
//! [swipe]
//! commit_threshold = 50.0
//! axis_lock_distance = 10.0
//! edge_resistance = 3.0
//!
//! [pull]
//! threshold = 80.0
//! resistance = 2.5
//! max_pull_factor = 1.5
//!
//! [feedback]
//! haptics = true
//! sounds = false
//! ```

use crate::domain::{Result, TouchflowError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default minimum horizontal displacement (px) for a swipe to change items.
pub const DEFAULT_COMMIT_THRESHOLD: f32 = 50.0;

/// Default movement (px) before a gesture is locked to an axis.
pub const DEFAULT_AXIS_LOCK_DISTANCE: f32 = 10.0;

/// Default divisor applied when dragging past the first or last item.
pub const DEFAULT_EDGE_RESISTANCE: f32 = 3.0;

/// Default pull distance (px, after resistance) that arms a refresh.
pub const DEFAULT_PULL_THRESHOLD: f32 = 80.0;

/// Default divisor applied to the raw downward drag.
pub const DEFAULT_PULL_RESISTANCE: f32 = 2.5;

/// Default cap on pull distance, as a multiple of the threshold.
pub const DEFAULT_MAX_PULL_FACTOR: f32 = 1.5;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub swipe: SwipeConfig,
    pub pull: PullConfig,
    pub feedback: FeedbackConfig,

    /// Tracing filter directive, e.g. `"debug"` or `"touchflow=trace"`.
    ///
    /// `RUST_LOG` takes precedence. Default: `"info"`.
    pub trace_level: Option<String>,
}

/// Swipe navigator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// A release commits only when `|offset|` is strictly greater than this.
    pub commit_threshold: f32,
    /// Movement required before the gesture locks horizontal or vertical.
    pub axis_lock_distance: f32,
    /// Rubber-band divisor at the first and last item.
    pub edge_resistance: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: DEFAULT_COMMIT_THRESHOLD,
            axis_lock_distance: DEFAULT_AXIS_LOCK_DISTANCE,
            edge_resistance: DEFAULT_EDGE_RESISTANCE,
        }
    }
}

/// Pull-to-refresh tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullConfig {
    /// Resistance-adjusted distance at which a release triggers a refresh.
    pub threshold: f32,
    /// Divisor applied to the raw downward drag.
    pub resistance: f32,
    /// Pull distance never exceeds `threshold * max_pull_factor`.
    pub max_pull_factor: f32,
}

impl PullConfig {
    /// Largest pull distance the indicator can reach.
    #[must_use]
    pub fn max_distance(&self) -> f32 {
        self.threshold * self.max_pull_factor
    }
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PULL_THRESHOLD,
            resistance: DEFAULT_PULL_RESISTANCE,
            max_pull_factor: DEFAULT_MAX_PULL_FACTOR,
        }
    }
}

/// Which feedback channels are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub haptics: bool,
    pub sounds: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            haptics: true,
            sounds: false,
        }
    }
}

impl Config {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Io`] if the file cannot be read,
    /// [`TouchflowError::Toml`] if it is not valid TOML, and
    /// [`TouchflowError::Config`] if a value fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Toml`] on syntax or type errors and
    /// [`TouchflowError::Config`] if a value fails validation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use touchflow::Config;
    ///
    /// let config = Config::from_toml_str("[pull]\nthreshold = 100.0\n")?;
    /// assert_eq!(config.pull.threshold, 100.0);
    /// assert_eq!(config.pull.resistance, 2.5);
    /// # Ok::<(), touchflow::TouchflowError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from flat string key/value pairs.
    ///
    /// Unknown keys are ignored and unparsable values fall back to their
    /// defaults, so a host can never fail to start because of a typo.
    ///
    /// # Parsing Rules
    ///
    /// - `swipe_threshold`, `axis_lock_distance`, `edge_resistance`,
    ///   `pull_threshold`, `pull_resistance`, `max_pull_factor`: `f32`
    /// - `haptics`, `sounds`: `bool`
    /// - `trace_level`: string
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use touchflow::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("pull_threshold".to_string(), "64".to_string());
    /// map.insert("sounds".to_string(), "yes please".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.pull.threshold, 64.0);
    /// assert!(!config.feedback.sounds);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        fn number(map: &BTreeMap<String, String>, key: &str, default: f32) -> f32 {
            map.get(key)
                .and_then(|s| s.trim().parse::<f32>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        }

        fn flag(map: &BTreeMap<String, String>, key: &str, default: bool) -> bool {
            map.get(key)
                .and_then(|s| s.trim().parse::<bool>().ok())
                .unwrap_or(default)
        }

        let swipe = SwipeConfig {
            commit_threshold: number(map, "swipe_threshold", DEFAULT_COMMIT_THRESHOLD),
            axis_lock_distance: number(map, "axis_lock_distance", DEFAULT_AXIS_LOCK_DISTANCE),
            edge_resistance: number(map, "edge_resistance", DEFAULT_EDGE_RESISTANCE)
                .max(1.0),
        };

        let pull = PullConfig {
            threshold: number(map, "pull_threshold", DEFAULT_PULL_THRESHOLD),
            resistance: number(map, "pull_resistance", DEFAULT_PULL_RESISTANCE).max(1.0),
            max_pull_factor: number(map, "max_pull_factor", DEFAULT_MAX_PULL_FACTOR).max(1.0),
        };

        let defaults = FeedbackConfig::default();
        let feedback = FeedbackConfig {
            haptics: flag(map, "haptics", defaults.haptics),
            sounds: flag(map, "sounds", defaults.sounds),
        };

        Self {
            swipe,
            pull,
            feedback,
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Checks that every tuning value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.swipe.validate()?;
        self.pull.validate()
    }
}

impl SwipeConfig {
    /// Checks that every value is finite, positive, and that the edge
    /// resistance does not amplify the drag.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        positive("swipe.commit_threshold", self.commit_threshold)?;
        positive("swipe.axis_lock_distance", self.axis_lock_distance)?;
        at_least_one("swipe.edge_resistance", self.edge_resistance)
    }
}

impl PullConfig {
    /// Checks that the threshold is finite and positive, and that resistance
    /// and the pull cap are at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        positive("pull.threshold", self.threshold)?;
        at_least_one("pull.resistance", self.resistance)?;
        at_least_one("pull.max_pull_factor", self.max_pull_factor)
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TouchflowError::Config(format!(
            "{field} must be a finite number greater than 0 (got {value})"
        )))
    }
}

fn at_least_one(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(TouchflowError::Config(format!(
            "{field} must be a finite number of at least 1 (got {value})"
        )))
    }
}
