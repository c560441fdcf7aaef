//! Haptic and audio feedback as an injected capability.
//!
//! Gesture controllers never reach for a device API directly. They receive a
//! [`FeedbackChannel`] wrapping any [`Feedback`] implementation, which keeps
//! them testable without a device and lets hosts without a vibration motor or
//! audio output pass [`NoopFeedback`].
//!
//! Feedback is fire-and-forget: implementations report whether the platform
//! supported the request, and the channel ignores the answer beyond a trace
//! log. Nothing here can fail a gesture.
//!
//! # Modules
//!
//! - `pattern`: Named haptic patterns and tones
//! - `recording`: A [`Feedback`] that records calls, for tests and replays

mod pattern;
mod recording;

pub use pattern::{HapticPattern, Tone};
pub use recording::{FeedbackCall, RecordingFeedback};

use crate::config::FeedbackConfig;
use std::fmt;
use std::rc::Rc;

/// Device capability for vibration and short tones.
///
/// Both methods are best-effort and return `false` when the platform does not
/// support the request. Implementations must not panic.
pub trait Feedback {
    /// Vibrates with alternating on/off durations in milliseconds.
    fn vibrate(&self, pattern: &[u32]) -> bool;

    /// Plays a short synthesized tone.
    fn play_tone(&self, tone: Tone) -> bool;
}

/// Feedback for platforms with neither vibration nor audio.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFeedback;

impl Feedback for NoopFeedback {
    fn vibrate(&self, _pattern: &[u32]) -> bool {
        false
    }

    fn play_tone(&self, _tone: Tone) -> bool {
        false
    }
}

/// A shared feedback capability together with the user's channel preferences.
///
/// Cloning is cheap; a navigator and a refresh controller on the same page
/// typically share one device handle.
#[derive(Clone)]
pub struct FeedbackChannel {
    device: Rc<dyn Feedback>,
    config: FeedbackConfig,
}

impl FeedbackChannel {
    pub fn new(device: Rc<dyn Feedback>, config: FeedbackConfig) -> Self {
        Self { device, config }
    }

    /// A channel that never produces feedback.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(Rc::new(NoopFeedback), FeedbackConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> FeedbackConfig {
        self.config
    }

    /// Emits `pattern` on every enabled channel.
    ///
    /// Vibrates when haptics are enabled and, when sounds are enabled, plays the
    /// tone paired with the pattern (if any).
    pub fn pulse(&self, pattern: HapticPattern) {
        if self.config.haptics && !self.device.vibrate(pattern.durations()) {
            tracing::trace!(?pattern, "vibration unsupported");
        }

        if self.config.sounds {
            if let Some(tone) = pattern.tone() {
                if !self.device.play_tone(tone) {
                    tracing::trace!(?tone, "tone playback unsupported");
                }
            }
        }
    }
}

impl fmt::Debug for FeedbackChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackChannel")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_vibrates_only_when_enabled() {
        let device = Rc::new(RecordingFeedback::new());
        let channel = FeedbackChannel::new(
            device.clone(),
            FeedbackConfig {
                haptics: false,
                sounds: false,
            },
        );

        channel.pulse(HapticPattern::Medium);
        assert!(device.calls().is_empty());
    }

    #[test]
    fn pulse_plays_paired_tone_when_sounds_enabled() {
        let device = Rc::new(RecordingFeedback::new());
        let channel = FeedbackChannel::new(
            device.clone(),
            FeedbackConfig {
                haptics: true,
                sounds: true,
            },
        );

        channel.pulse(HapticPattern::Success);
        assert_eq!(
            device.calls(),
            vec![
                FeedbackCall::Vibrate(vec![10, 50, 10]),
                FeedbackCall::Tone(Tone::Success),
            ]
        );
    }

    #[test]
    fn patterns_without_a_tone_stay_silent() {
        let device = Rc::new(RecordingFeedback::new());
        let channel = FeedbackChannel::new(
            device.clone(),
            FeedbackConfig {
                haptics: false,
                sounds: true,
            },
        );

        channel.pulse(HapticPattern::Medium);
        assert!(device.calls().is_empty());
    }

    #[test]
    fn unsupported_device_is_harmless() {
        let channel = FeedbackChannel::new(
            Rc::new(NoopFeedback),
            FeedbackConfig {
                haptics: true,
                sounds: true,
            },
        );
        channel.pulse(HapticPattern::Error);
    }
}
