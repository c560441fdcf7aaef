//! Executes a [`Script`] and records a frame per step.

use super::script::{RefreshBehavior, Script, ScriptEvent};
use crate::config::Config;
use crate::domain::{Result, SwipeDirection};
use crate::feedback::{FeedbackCall, FeedbackChannel, RecordingFeedback};
use crate::input::TouchSurface;
use crate::refresh::{PullSnapshot, PullToRefresh};
use crate::swipe::{SwipeNavigator, SwipeSnapshot};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A committed carousel transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub direction: SwipeDirection,
    pub index: usize,
}

/// State of both controllers after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: usize,
    pub event: ScriptEvent,
    pub default_prevented: bool,
    pub swipe: SwipeSnapshot,
    pub pull: PullSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<Commit>,
    /// Outcomes of refreshes that settled during this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub settled: Vec<String>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub frames: Vec<Frame>,
    pub feedback: Vec<FeedbackCall>,
    pub commits: usize,
    pub refreshes: usize,
    pub failed_refreshes: usize,
}

/// Replays `script` against fresh controllers tuned by `config`.
///
/// Refreshes triggered by a page release stay pending (and the indicator
/// stays in its refreshing state) until a `settle` step or the end of the
/// script.
///
/// # Errors
///
/// Returns [`TouchflowError::Script`](crate::TouchflowError::Script) if the
/// script is invalid.
///
/// # Example
///
/// ```rust
/// use touchflow::replay::{run, Script};
/// use touchflow::Config;
///
/// let script = Script::from_json_str(r#"{
///     "item_count": 4,
///     "start_index": 1,
///     "events": [
///         { "type": "carousel", "phase": "start", "x": 200, "y": 0 },
///         { "type": "carousel", "phase": "move", "x": 120, "y": 0 },
///         { "type": "carousel", "phase": "end" }
///     ]
/// }"#)?;
///
/// let report = run(&script, &Config::default())?;
/// assert_eq!(report.frames.last().unwrap().swipe.current_index, 2);
/// # Ok::<(), touchflow::TouchflowError>(())
/// ```
pub fn run(script: &Script, config: &Config) -> Result<ReplayReport> {
    script.validate()?;
    let _span = tracing::info_span!("replay", events = script.events.len()).entered();

    let device = Rc::new(RecordingFeedback::new());
    let feedback = FeedbackChannel::new(device.clone(), config.feedback);

    let last_commit = Rc::new(Cell::new(None::<Commit>));
    let commit_sink = Rc::clone(&last_commit);
    let navigator = Rc::new(
        SwipeNavigator::with_config(script.item_count, config.swipe, feedback.clone())?.on_swipe(
            move |direction, index| commit_sink.set(Some(Commit { direction, index })),
        ),
    );
    navigator.go_to(script.start_index);

    let scroll_offset = Rc::new(Cell::new(script.scroll_offset));
    let reader = Rc::clone(&scroll_offset);
    let settled = Rc::new(RefCell::new(Vec::new()));
    let settled_sink = Rc::clone(&settled);
    let behavior = script.refresh;
    let refresh = PullToRefresh::with_config(
        config.pull,
        move || reader.get(),
        feedback,
        move || async move {
            match behavior {
                RefreshBehavior::Succeed => Ok(()),
                RefreshBehavior::Fail => Err("scripted refresh failure"),
            }
        },
    )?
    .on_settled(move |outcome| settled_sink.borrow_mut().push(outcome.label().to_string()));

    // Feedback from positioning at the start index is not part of the replay.
    device.clear();

    let carousel_surface = TouchSurface::new();
    let page_surface = TouchSurface::new();
    let _carousel = carousel_surface.attach(navigator.clone());
    let _page = page_surface.attach(Rc::new(refresh.clone()));

    let mut pending: Vec<LocalBoxFuture<'static, ()>> = Vec::new();
    let mut frames = Vec::with_capacity(script.events.len());
    let mut commits = 0;
    let mut all_settled = Vec::new();

    for (step, event) in script.events.iter().enumerate() {
        let mut default_prevented = false;

        match event {
            ScriptEvent::Carousel { .. } | ScriptEvent::Page { .. } => {
                let surface = if matches!(event, ScriptEvent::Carousel { .. }) {
                    &carousel_surface
                } else {
                    &page_surface
                };
                if let Some(touch) = event.touch_event() {
                    let response = surface.dispatch(&touch);
                    default_prevented = response.default_prevented;
                    pending.extend(response.tasks);
                }
            }
            ScriptEvent::Scroll { offset } => scroll_offset.set(*offset),
            ScriptEvent::Settle => settle(&mut pending),
            ScriptEvent::GoTo { index } => {
                navigator.go_to(*index);
            }
            ScriptEvent::Next => {
                navigator.go_next();
            }
            ScriptEvent::Prev => {
                navigator.go_prev();
            }
        }

        let commit = last_commit.take();
        commits += usize::from(commit.is_some());
        let step_settled: Vec<String> = settled.borrow_mut().drain(..).collect();
        all_settled.extend(step_settled.iter().cloned());

        frames.push(Frame {
            step,
            event: event.clone(),
            default_prevented,
            swipe: navigator.snapshot(),
            pull: refresh.snapshot(),
            commit,
            settled: step_settled,
        });
    }

    settle(&mut pending);
    all_settled.extend(settled.borrow_mut().drain(..));

    let failed_refreshes = all_settled.iter().filter(|label| *label == "failed").count();
    let report = ReplayReport {
        frames,
        feedback: device.calls(),
        commits,
        refreshes: all_settled.len(),
        failed_refreshes,
    };

    tracing::info!(
        commits = report.commits,
        refreshes = report.refreshes,
        failed_refreshes = report.failed_refreshes,
        "replay finished"
    );

    Ok(report)
}

fn settle(pending: &mut Vec<LocalBoxFuture<'static, ()>>) {
    for task in pending.drain(..) {
        pollster::block_on(task);
    }
}
