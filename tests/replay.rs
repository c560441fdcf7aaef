use std::fs;

use tempfile::TempDir;
use touchflow::feedback::FeedbackCall;
use touchflow::replay::{run, Commit, Script};
use touchflow::{Config, FeedbackConfig, SwipeDirection, TouchflowError};

const MIXED: &str = r#"{
    "item_count": 4,
    "start_index": 1,
    "events": [
        { "type": "carousel", "phase": "start", "x": 200, "y": 0 },
        { "type": "carousel", "phase": "move", "x": 120, "y": 0 },
        { "type": "carousel", "phase": "end" },
        { "type": "page", "phase": "start", "x": 0, "y": 0 },
        { "type": "page", "phase": "move", "x": 0, "y": 300 },
        { "type": "page", "phase": "end" },
        { "type": "page", "phase": "start", "x": 0, "y": 0 },
        { "type": "page", "phase": "move", "x": 0, "y": 300 },
        { "type": "page", "phase": "end" },
        { "type": "settle" }
    ]
}"#;

#[test]
fn mixed_script_reports_every_step() {
    let script = Script::from_json_str(MIXED).unwrap();
    let report = run(&script, &Config::default()).unwrap();

    assert_eq!(report.frames.len(), 10);
    assert_eq!(report.commits, 1);
    assert_eq!(report.refreshes, 1);
    assert_eq!(report.failed_refreshes, 0);

    let committed = &report.frames[2];
    assert_eq!(
        committed.commit,
        Some(Commit {
            direction: SwipeDirection::Left,
            index: 2
        })
    );
    assert_eq!(committed.swipe.current_index, 2);

    let pulled = &report.frames[4];
    assert!(pulled.default_prevented);
    assert_eq!(pulled.pull.pull_distance, 120.0);

    // The first release starts a refresh that stays pending until `settle`.
    assert!(report.frames[5].pull.is_refreshing);
    assert!(report.frames[7].pull.is_refreshing);
    assert!(!report.frames[7].default_prevented);
    assert!(report.frames[8].settled.is_empty());

    let settled = &report.frames[9];
    assert_eq!(settled.settled, vec!["completed".to_string()]);
    assert!(!settled.pull.is_refreshing);
}

#[test]
fn feedback_is_recorded_in_order() {
    let script = Script::from_json_str(MIXED).unwrap();
    let report = run(&script, &Config::default()).unwrap();

    assert_eq!(
        report.feedback,
        vec![
            FeedbackCall::Vibrate(vec![10]),
            FeedbackCall::Vibrate(vec![20]),
            FeedbackCall::Vibrate(vec![10, 50, 10]),
        ]
    );
}

#[test]
fn disabled_haptics_record_nothing() {
    let script = Script::from_json_str(MIXED).unwrap();
    let config = Config {
        feedback: FeedbackConfig {
            haptics: false,
            sounds: false,
        },
        ..Config::default()
    };

    assert!(run(&script, &config).unwrap().feedback.is_empty());
}

#[test]
fn failing_refresh_is_counted() {
    let script = Script::from_json_str(
        r#"{
            "item_count": 1,
            "refresh": "fail",
            "events": [
                { "type": "page", "phase": "start", "x": 0, "y": 0 },
                { "type": "page", "phase": "move", "x": 0, "y": 250 },
                { "type": "page", "phase": "end" }
            ]
        }"#,
    )
    .unwrap();

    let report = run(&script, &Config::default()).unwrap();

    assert_eq!(report.refreshes, 1);
    assert_eq!(report.failed_refreshes, 1);
    // Unsettled refreshes are drained after the last step.
    assert!(report.frames[2].pull.is_refreshing);
}

#[test]
fn scrolled_page_never_refreshes() {
    let script = Script::from_json_str(
        r#"{
            "item_count": 1,
            "scroll_offset": 30,
            "events": [
                { "type": "page", "phase": "start", "x": 0, "y": 0 },
                { "type": "page", "phase": "move", "x": 0, "y": 400 },
                { "type": "page", "phase": "end" },
                { "type": "scroll", "offset": 0 },
                { "type": "page", "phase": "start", "x": 0, "y": 0 },
                { "type": "page", "phase": "move", "x": 0, "y": 400 },
                { "type": "page", "phase": "end" }
            ]
        }"#,
    )
    .unwrap();

    let report = run(&script, &Config::default()).unwrap();

    assert!(!report.frames[1].default_prevented);
    assert!(report.frames[5].default_prevented);
    assert_eq!(report.refreshes, 1);
}

#[test]
fn imperative_steps_do_not_count_as_commits() {
    let script = Script::from_json_str(
        r#"{
            "item_count": 3,
            "events": [
                { "type": "next" },
                { "type": "next" },
                { "type": "next" },
                { "type": "prev" },
                { "type": "go_to", "index": 9 }
            ]
        }"#,
    )
    .unwrap();

    let report = run(&script, &Config::default()).unwrap();
    let indices: Vec<usize> = report.frames.iter().map(|f| f.swipe.current_index).collect();

    assert_eq!(indices, vec![1, 2, 2, 1, 1]);
    assert_eq!(report.commits, 0);
    assert_eq!(report.feedback.len(), 3);
}

#[test]
fn toml_script_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("swipe.toml");
    fs::write(
        &path,
        r#"
item_count = 2

[[events]]
type = "carousel"
phase = "start"
x = 300.0
y = 0.0

[[events]]
type = "carousel"
phase = "move"
x = 100.0
y = 10.0

[[events]]
type = "carousel"
phase = "end"
"#,
    )
    .unwrap();

    let script = Script::from_file(&path).unwrap();
    let report = run(&script, &Config::default()).unwrap();

    assert_eq!(report.frames.last().unwrap().swipe.current_index, 1);
}

#[test]
fn invalid_script_is_rejected() {
    let err = Script::from_json_str(r#"{ "item_count": 0, "events": [] }"#).unwrap_err();
    assert!(matches!(err, TouchflowError::Script(_)));
}

#[test]
fn report_serializes_to_json() {
    let script = Script::from_json_str(MIXED).unwrap();
    let report = run(&script, &Config::default()).unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["commits"], 1);
    assert_eq!(json["frames"][2]["commit"]["direction"], "left");
    assert_eq!(json["frames"][0]["event"]["type"], "carousel");
    assert_eq!(json["feedback"][0]["kind"], "vibrate");
    assert!(json["frames"][0].get("commit").is_none());
}
