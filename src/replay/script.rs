//! Recorded gesture scripts.
//!
//! A script describes one carousel, one scrollable page with a pull-to-refresh
//! indicator, and the sequence of touches delivered to them.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "item_count": 4,
//!   "start_index": 1,
//!   "refresh": "fail",
//!   "events": [
//!     { "type": "carousel", "phase": "start", "x": 200, "y": 40 },
//!     { "type": "carousel", "phase": "move", "x": 120, "y": 42 },
//!     { "type": "carousel", "phase": "end" },
//!     { "type": "page", "phase": "start", "x": 0, "y": 0 },
//!     { "type": "page", "phase": "move", "x": 0, "y": 300 },
//!     { "type": "page", "phase": "end" },
//!     { "type": "settle" }
//!   ]
//! }
//! ```

use crate::domain::{Point, Result, TouchflowError};
use crate::input::{TouchEvent, TouchPhase};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the scripted refresh operation behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshBehavior {
    #[default]
    Succeed,
    Fail,
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// A touch on the carousel surface.
    Carousel {
        phase: TouchPhase,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    /// A touch on the page surface.
    Page {
        phase: TouchPhase,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    /// The page scrolled to a new vertical offset.
    Scroll { offset: f32 },
    /// Runs every pending refresh to completion.
    Settle,
    GoTo { index: usize },
    Next,
    Prev,
}

impl ScriptEvent {
    /// The touch event for `Carousel` and `Page` steps.
    #[must_use]
    pub fn touch_event(&self) -> Option<TouchEvent> {
        let (phase, x, y) = match *self {
            Self::Carousel { phase, x, y } | Self::Page { phase, x, y } => (phase, x, y),
            _ => return None,
        };

        Some(match phase {
            TouchPhase::Start => TouchEvent::start(Point::new(x, y)),
            TouchPhase::Move => TouchEvent::moved(Point::new(x, y)),
            TouchPhase::End => TouchEvent::end(),
            TouchPhase::Cancel => TouchEvent::cancel(),
        })
    }
}

/// A complete replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub item_count: usize,
    #[serde(default)]
    pub start_index: usize,
    /// Initial vertical scroll offset of the page.
    #[serde(default)]
    pub scroll_offset: f32,
    #[serde(default)]
    pub refresh: RefreshBehavior,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Loads a script, choosing TOML for `.toml` files and JSON otherwise.
    ///
    /// # Errors
    ///
    /// Returns I/O and parse errors, or [`TouchflowError::Script`] when the
    /// script fails [`Script::validate`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let script: Self = if is_toml {
            toml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        script.validate()?;
        tracing::debug!(
            path = %path.display(),
            events = script.events.len(),
            "loaded replay script"
        );
        Ok(script)
    }

    /// Parses a JSON script.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Json`] or [`TouchflowError::Script`].
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(contents)?;
        script.validate()?;
        Ok(script)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`TouchflowError::Script`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.item_count == 0 {
            return Err(TouchflowError::Script("item_count must be at least 1".to_string()));
        }

        if self.start_index >= self.item_count {
            return Err(TouchflowError::Script(format!(
                "start_index {} is out of range for {} items",
                self.start_index, self.item_count
            )));
        }

        if !self.scroll_offset.is_finite() {
            return Err(TouchflowError::Script("scroll_offset must be finite".to_string()));
        }

        for (step, event) in self.events.iter().enumerate() {
            let finite = match *event {
                ScriptEvent::Carousel { x, y, .. } | ScriptEvent::Page { x, y, .. } => {
                    x.is_finite() && y.is_finite()
                }
                ScriptEvent::Scroll { offset } => offset.is_finite(),
                _ => true,
            };
            if !finite {
                return Err(TouchflowError::Script(format!(
                    "event {step} has a non-finite coordinate"
                )));
            }
        }

        Ok(())
    }
}
