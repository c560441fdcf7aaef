//! Pull-to-refresh state, outcomes and the render-facing snapshot.

use crate::domain::RefreshError;
use serde::Serialize;
use std::fmt;

/// Mutable state of one controller. Reset at the end of every gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PullState {
    pub start_y: f32,
    /// Resistance-adjusted, capped downward displacement.
    pub pull_distance: f32,
    pub is_pulling: bool,
    pub is_refreshing: bool,
    /// The threshold haptic already fired during this gesture.
    pub threshold_reached: bool,
}

impl PullState {
    /// Clears the gesture, keeping only `is_refreshing`.
    pub fn reset_gesture(&mut self) {
        *self = Self {
            is_refreshing: self.is_refreshing,
            ..Self::default()
        };
    }
}

/// How a released pull gesture ended.
pub enum RefreshOutcome {
    /// No refresh: not pulling, below threshold, or one already running.
    Skipped,
    /// The refresh operation finished successfully.
    Completed,
    /// The refresh operation failed. Nothing is retried.
    Failed(RefreshError),
}

impl RefreshOutcome {
    /// Whether this gesture invoked the refresh operation.
    #[must_use]
    pub const fn triggered(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short machine-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Completed => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Debug for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => f.write_str("Skipped"),
            Self::Completed => f.write_str("Completed"),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => write!(f, "failed: {err}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Read-only view of a controller for rendering the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PullSnapshot {
    pub pull_distance: f32,
    /// `pull_distance / threshold`, clamped to `[0, 1]`.
    pub progress: f32,
    pub is_pulling: bool,
    pub is_refreshing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_refreshing_flag() {
        let mut state = PullState {
            start_y: 40.0,
            pull_distance: 90.0,
            is_pulling: true,
            is_refreshing: true,
            threshold_reached: true,
        };
        state.reset_gesture();
        assert_eq!(
            state,
            PullState {
                is_refreshing: true,
                ..PullState::default()
            }
        );
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(RefreshOutcome::Skipped.to_string(), "skipped");
        assert!(!RefreshOutcome::Skipped.triggered());
        let failed = RefreshOutcome::Failed(RefreshError::new("offline"));
        assert!(failed.triggered());
        assert!(failed.is_failed());
        assert_eq!(failed.to_string(), "failed: offline");
    }
}
