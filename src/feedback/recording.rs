//! In-memory [`Feedback`] that records every request.

use super::{Feedback, Tone};
use serde::Serialize;
use std::cell::RefCell;

/// One recorded feedback request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FeedbackCall {
    Vibrate(Vec<u32>),
    Tone(Tone),
}

/// Records calls and reports every capability as supported.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    calls: RefCell<Vec<FeedbackCall>>,
}

impl RecordingFeedback {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<FeedbackCall> {
        self.calls.borrow().clone()
    }

    /// Number of vibration requests matching `pattern` exactly.
    #[must_use]
    pub fn vibrations_of(&self, pattern: &[u32]) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, FeedbackCall::Vibrate(p) if p.as_slice() == pattern))
            .count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Feedback for RecordingFeedback {
    fn vibrate(&self, pattern: &[u32]) -> bool {
        self.calls
            .borrow_mut()
            .push(FeedbackCall::Vibrate(pattern.to_vec()));
        true
    }

    fn play_tone(&self, tone: Tone) -> bool {
        self.calls.borrow_mut().push(FeedbackCall::Tone(tone));
        true
    }
}
