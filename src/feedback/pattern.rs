//! Named haptic patterns and synthesized tones.

use serde::{Deserialize, Serialize};

/// Vibration intensities used by the gesture controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticPattern {
    Selection,
    /// Item change in a carousel.
    Light,
    /// Pull distance reached the refresh threshold.
    Medium,
    Heavy,
    /// Refresh started.
    Success,
    Warning,
    Error,
}

impl HapticPattern {
    /// Alternating on/off durations in milliseconds.
    #[must_use]
    pub const fn durations(self) -> &'static [u32] {
        match self {
            Self::Selection => &[5],
            Self::Light => &[10],
            Self::Medium => &[20],
            Self::Heavy => &[30],
            Self::Success => &[10, 50, 10],
            Self::Warning => &[30, 50, 30],
            Self::Error => &[50, 100, 50],
        }
    }

    /// Tone played alongside the vibration when sounds are enabled.
    #[must_use]
    pub const fn tone(self) -> Option<Tone> {
        match self {
            Self::Selection | Self::Light => Some(Tone::Tap),
            Self::Success => Some(Tone::Success),
            Self::Error => Some(Tone::Error),
            Self::Medium | Self::Heavy | Self::Warning => None,
        }
    }
}

/// Short tones for audible feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Tap,
    Success,
    Error,
}

impl Tone {
    #[must_use]
    pub const fn frequency_hz(self) -> u32 {
        match self {
            Self::Tap => 600,
            Self::Success => 880,
            Self::Error => 220,
        }
    }

    #[must_use]
    pub const fn duration_ms(self) -> u32 {
        match self {
            Self::Tap => 50,
            Self::Success => 120,
            Self::Error => 200,
        }
    }
}
