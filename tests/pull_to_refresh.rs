use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::task::noop_waker_ref;
use futures::FutureExt;
use touchflow::feedback::{FeedbackCall, FeedbackChannel, RecordingFeedback};
use touchflow::refresh::{blocking, PullToRefresh, RefreshOutcome};
use touchflow::{FeedbackConfig, Point, PullConfig, Propagation, TouchflowError};

fn at_top() -> impl Fn() -> f32 {
    || 0.0
}

fn succeeding(calls: Rc<Cell<usize>>) -> PullToRefresh {
    PullToRefresh::new(at_top(), FeedbackChannel::silent(), move || {
        calls.set(calls.get() + 1);
        async { Ok::<(), Infallible>(()) }
    })
}

fn pull(controller: &PullToRefresh, raw: f32) {
    controller.touch_start(Point::new(0.0, 0.0));
    controller.touch_move(Point::new(0.0, raw));
}

/// A controller whose first refresh stays pending until the returned sender fires.
fn gated(calls: Rc<Cell<usize>>) -> (PullToRefresh, oneshot::Sender<()>) {
    let (tx, rx) = oneshot::channel::<()>();
    let gate = RefCell::new(Some(rx));

    let controller = PullToRefresh::new(at_top(), FeedbackChannel::silent(), move || {
        calls.set(calls.get() + 1);
        let rx = gate.borrow_mut().take();
        async move {
            match rx {
                Some(rx) => rx.await.map_err(|_| "gate dropped"),
                None => Ok(()),
            }
        }
    });

    (controller, tx)
}

#[test]
fn long_pull_is_clamped_and_refreshes() {
    let calls = Rc::new(Cell::new(0));
    let controller = succeeding(Rc::clone(&calls));

    controller.touch_start(Point::new(0.0, 0.0));
    assert_eq!(controller.touch_move(Point::new(0.0, 300.0)), Propagation::Consumed);
    assert_eq!(controller.pull_distance(), 120.0);

    controller.touch_move(Point::new(0.0, 600.0));
    assert_eq!(controller.pull_distance(), 120.0);
    assert_eq!(controller.progress(), 1.0);

    let release = controller.touch_end();
    assert!(controller.is_refreshing());
    assert_eq!(calls.get(), 1);

    let outcome = pollster::block_on(release);
    assert!(matches!(outcome, RefreshOutcome::Completed));
    assert!(!controller.is_refreshing());
    assert_eq!(controller.pull_distance(), 0.0);
}

#[test]
fn short_pull_snaps_back_without_refreshing() {
    let calls = Rc::new(Cell::new(0));
    let controller = succeeding(Rc::clone(&calls));

    pull(&controller, 150.0);
    assert_eq!(controller.pull_distance(), 60.0);
    assert!((controller.progress() - 0.75).abs() < 1e-6);

    let outcome = pollster::block_on(controller.touch_end());

    assert!(matches!(outcome, RefreshOutcome::Skipped));
    assert_eq!(calls.get(), 0);
    assert_eq!(controller.pull_distance(), 0.0);
    assert!(!controller.is_pulling());
}

#[test]
fn exactly_at_threshold_refreshes() {
    let calls = Rc::new(Cell::new(0));
    let controller = succeeding(Rc::clone(&calls));

    pull(&controller, 200.0);
    assert_eq!(controller.pull_distance(), 80.0);

    assert!(pollster::block_on(controller.touch_end()).triggered());
    assert_eq!(calls.get(), 1);
}

#[test]
fn pull_is_ignored_when_scrolled_down() {
    let offset = Rc::new(Cell::new(40.0_f32));
    let reader = Rc::clone(&offset);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let controller = PullToRefresh::new(move || reader.get(), FeedbackChannel::silent(), move || {
        counter.set(counter.get() + 1);
        async { Ok::<(), Infallible>(()) }
    });

    controller.touch_start(Point::new(0.0, 0.0));
    assert_eq!(controller.touch_move(Point::new(0.0, 400.0)), Propagation::Ignored);
    assert!(!pollster::block_on(controller.touch_end()).triggered());
    assert_eq!(calls.get(), 0);

    offset.set(0.0);
    pull(&controller, 400.0);
    assert!(pollster::block_on(controller.touch_end()).triggered());
    assert_eq!(calls.get(), 1);
}

#[test]
fn scrolling_away_mid_pull_stops_tracking() {
    let offset = Rc::new(Cell::new(0.0_f32));
    let reader = Rc::clone(&offset);
    let controller = PullToRefresh::new(
        move || reader.get(),
        FeedbackChannel::silent(),
        || async { Ok::<(), Infallible>(()) },
    );

    controller.touch_start(Point::new(0.0, 0.0));
    controller.touch_move(Point::new(0.0, 100.0));
    assert_eq!(controller.pull_distance(), 40.0);

    offset.set(5.0);
    assert_eq!(controller.touch_move(Point::new(0.0, 400.0)), Propagation::Ignored);
    assert_eq!(controller.pull_distance(), 40.0);
}

#[test]
fn upward_drag_is_not_consumed() {
    let controller = succeeding(Rc::new(Cell::new(0)));

    controller.touch_start(Point::new(0.0, 300.0));
    assert_eq!(controller.touch_move(Point::new(0.0, 250.0)), Propagation::Ignored);
    assert_eq!(controller.pull_distance(), 0.0);
}

#[test]
fn second_pull_during_refresh_is_a_no_op() {
    let calls = Rc::new(Cell::new(0));
    let (controller, gate) = gated(Rc::clone(&calls));
    let mut cx = Context::from_waker(noop_waker_ref());

    pull(&controller, 300.0);
    let mut first = controller.touch_end();
    assert!(first.poll_unpin(&mut cx).is_pending());
    assert!(controller.is_refreshing());

    controller.touch_start(Point::new(0.0, 0.0));
    assert_eq!(controller.touch_move(Point::new(0.0, 500.0)), Propagation::Ignored);
    let second = controller.touch_end().now_or_never();
    assert!(matches!(second, Some(RefreshOutcome::Skipped)));
    assert_eq!(calls.get(), 1);
    assert!(controller.is_refreshing());

    gate.send(()).unwrap();
    match first.poll_unpin(&mut cx) {
        Poll::Ready(outcome) => assert!(matches!(outcome, RefreshOutcome::Completed)),
        Poll::Pending => panic!("refresh should settle once the gate opens"),
    }
    assert!(!controller.is_refreshing());

    // A fresh gesture works again after settling.
    pull(&controller, 300.0);
    assert!(pollster::block_on(controller.touch_end()).triggered());
    assert_eq!(calls.get(), 2);
}

#[test]
fn failed_refresh_clears_indicator_and_is_reported() {
    let settled = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&settled);
    let controller = PullToRefresh::new(at_top(), FeedbackChannel::silent(), || async {
        Err::<(), _>("network unreachable")
    })
    .on_settled(move |outcome| sink.borrow_mut().push(outcome.to_string()));

    pull(&controller, 300.0);
    let outcome = pollster::block_on(controller.touch_end());

    match outcome {
        RefreshOutcome::Failed(err) => assert_eq!(err.to_string(), "network unreachable"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(!controller.is_refreshing());
    assert_eq!(*settled.borrow(), vec!["failed: network unreachable".to_string()]);
}

#[test]
fn abandoned_refresh_still_clears_indicator() {
    let (controller, _gate) = gated(Rc::new(Cell::new(0)));

    pull(&controller, 300.0);
    let pending = controller.touch_end();
    assert!(controller.is_refreshing());

    drop(pending);

    assert!(!controller.is_refreshing());
    assert_eq!(controller.pull_distance(), 0.0);
}

#[test]
fn cancel_never_refreshes() {
    let calls = Rc::new(Cell::new(0));
    let controller = succeeding(Rc::clone(&calls));

    pull(&controller, 400.0);
    controller.touch_cancel();

    assert_eq!(controller.pull_distance(), 0.0);
    assert!(!pollster::block_on(controller.touch_end()).triggered());
    assert_eq!(calls.get(), 0);
}

#[test]
fn threshold_and_release_feedback() {
    let device = Rc::new(RecordingFeedback::new());
    let channel = FeedbackChannel::new(device.clone(), FeedbackConfig::default());
    let controller = PullToRefresh::new(at_top(), channel, blocking(|| Ok::<(), Infallible>(())));

    controller.touch_start(Point::new(0.0, 0.0));
    controller.touch_move(Point::new(0.0, 100.0));
    assert!(device.calls().is_empty());

    controller.touch_move(Point::new(0.0, 210.0));
    controller.touch_move(Point::new(0.0, 260.0));
    controller.touch_move(Point::new(0.0, 300.0));
    assert_eq!(device.calls(), vec![FeedbackCall::Vibrate(vec![20])]);

    pollster::block_on(controller.touch_end());
    assert_eq!(
        device.calls(),
        vec![
            FeedbackCall::Vibrate(vec![20]),
            FeedbackCall::Vibrate(vec![10, 50, 10]),
        ]
    );
}

#[test]
fn clones_share_state() {
    let controller = succeeding(Rc::new(Cell::new(0)));
    let view = controller.clone();

    pull(&controller, 100.0);

    assert_eq!(view.pull_distance(), 40.0);
    assert!(view.snapshot().is_pulling);
}

fn crashing_backend() -> Result<(), Infallible> {
    panic!("refresh backend crashed")
}

#[test]
fn panic_while_starting_refresh_clears_indicator() {
    let controller = PullToRefresh::new(
        at_top(),
        FeedbackChannel::silent(),
        blocking(crashing_backend),
    );

    pull(&controller, 300.0);
    let result = catch_unwind(AssertUnwindSafe(|| controller.touch_end()));

    assert!(result.is_err());
    assert!(!controller.is_refreshing());
    assert_eq!(controller.pull_distance(), 0.0);
}

#[test]
fn panic_while_awaiting_refresh_clears_indicator() {
    let controller = PullToRefresh::new(at_top(), FeedbackChannel::silent(), || async {
        crashing_backend()
    });

    pull(&controller, 300.0);
    let release = controller.touch_end();
    assert!(controller.is_refreshing());

    let result = catch_unwind(AssertUnwindSafe(|| pollster::block_on(release)));

    assert!(result.is_err());
    assert!(!controller.is_refreshing());

    pull(&controller, 300.0);
    assert!(controller.release_will_refresh());
}

#[test]
fn degenerate_tuning_is_rejected() {
    let config = PullConfig {
        threshold: 0.0,
        ..PullConfig::default()
    };
    let result = PullToRefresh::with_config(config, at_top(), FeedbackChannel::silent(), || async {
        Ok::<(), Infallible>(())
    });

    assert!(matches!(result, Err(TouchflowError::Config(_))));
}
