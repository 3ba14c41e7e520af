//! Transition intents sent to the host shell and their completion.

use std::sync::Arc;

use panes_lib::events::channel;
use panes_lib::ipc::IpcMessage;
use panes_lib::transition::Easing;
use panes_lib::window::Rect;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::common::Harness;

const WINDOWS: [(&str, f64, f64); 3] = [("a", 500.0, 450.0), ("b", 700.0, 450.0), ("c", 600.0, 450.0)];

#[test]
fn test_enabled_transition_sends_one_intent_per_window() {
    let mut harness = Harness::with_group("g", &WINDOWS);
    let before = harness.geometries(&["a", "b", "c"]);

    let mut group = harness.manager.group_mut("g").unwrap();
    group.transition().duration(250).unwrap().easing("ease-in-out").unwrap();
    group.arrange_horizontal_with_transition().unwrap();
    drop(group);

    assert_eq!(harness.geometries(&["a", "b", "c"]), before);

    let intents = harness.transport.messages_on(channel::TRANSITION);
    assert_eq!(intents.len(), 3);
    let labels: Vec<&str> = intents.iter().filter_map(|m| m.payload["window"]["label"].as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
    assert_eq!(intents[2].payload["to"], json!({ "x": 1200.0 }));
    assert_eq!(intents[2].payload["options"], json!({ "duration": 250, "easing": "easeInOut", "enabled": true }));
}

#[test]
fn test_disabled_transition_writes_immediately() {
    let mut harness = Harness::with_group("g", &WINDOWS);

    let mut group = harness.manager.group_mut("g").unwrap();
    group.transition().set_enabled(false);
    group.arrange_horizontal_with_transition().unwrap();
    drop(group);

    assert!(harness.transport.messages_on(channel::TRANSITION).is_empty());
    assert_eq!(harness.geometry("c"), Rect::new(1200.0, 0.0, 600.0, 450.0));
}

#[test]
fn test_completion_round_trip_through_ipc() {
    let mut harness = Harness::with_group("g", &WINDOWS);
    harness.manager.group_mut("g").unwrap().arrange_horizontal_with_transition().unwrap();

    let completed = Arc::new(Mutex::new(Vec::new()));
    let sink = completed.clone();
    harness.events.listen(channel::TRANSITION_COMPLETED, 0, move |event: &panes_lib::events::Event| {
        sink.lock().push(event.payload().clone());
    });

    // The host shell echoes each intent back once the animation ends.
    for intent in harness.transport.messages_on(channel::TRANSITION) {
        let payload = json!({ "window": intent.payload["window"], "to": intent.payload["to"] });
        harness.ipc.receive(IpcMessage::new(channel::TRANSITION_COMPLETED, payload));
    }

    let completions: Vec<Value> = completed.lock().clone();
    assert_eq!(completions.len(), 3);
    for payload in &completions {
        harness.manager.complete_transition(payload).unwrap();
    }
    assert_eq!(harness.geometry("b"), Rect::new(500.0, 0.0, 700.0, 450.0));
    assert_eq!(harness.geometry("c"), Rect::new(1200.0, 0.0, 600.0, 450.0));
}

#[test]
fn test_invalid_transition_options_are_rejected() {
    let mut harness = Harness::with_group("g", &WINDOWS);
    let mut group = harness.manager.group_mut("g").unwrap();

    assert!(group.transition().duration(-1).is_err());
    assert!(group.transition().easing("wobble").is_err());
    assert_eq!(group.transition_spec().map(|spec| spec.easing), Some(Easing::Linear));
}

#[test]
fn test_sync_with_transition_recomputes_for_target_members() {
    let mut harness = Harness::with_group("left", &[("a", 500.0, 450.0), ("b", 600.0, 450.0)]);
    for (id, width) in [("c", 400.0), ("d", 450.0), ("e", 500.0)] {
        harness.manager.create(id, &panes_lib::window::WindowOptions::sized(width, 400.0)).unwrap();
    }
    let mut right = harness.manager.create_group("right").unwrap();
    right.add("c").unwrap().add("d").unwrap().add("e").unwrap();
    drop(right);

    let mut left = harness.manager.group_mut("left").unwrap();
    left.transition().duration(150).unwrap().easing("ease-out").unwrap();
    left.arrange_grid().unwrap();
    drop(left);
    let before = harness.geometries(&["c", "d", "e"]);
    harness.transport.clear();

    harness.manager.group_mut("left").unwrap().sync_layout_with_transition("right").unwrap();

    let right = harness.manager.group("right").unwrap();
    assert_eq!(right.layout_name(), Some("grid"));
    let spec = right.transition_spec().unwrap();
    assert_eq!(spec.duration_ms, 150);
    assert_eq!(spec.easing, Easing::EaseOut);

    // three windows on 1920x1080: 2 columns, 2 rows
    let intents = harness.transport.messages_on(channel::TRANSITION);
    let targets: Vec<(&str, &Value)> =
        intents.iter().map(|m| (m.payload["window"]["label"].as_str().unwrap(), &m.payload["to"])).collect();
    assert_eq!(
        targets,
        vec![
            ("c", &json!({ "x": 0.0, "y": 0.0, "width": 960.0, "height": 540.0 })),
            ("d", &json!({ "x": 960.0, "y": 0.0, "width": 960.0, "height": 540.0 })),
            ("e", &json!({ "x": 0.0, "y": 540.0, "width": 960.0, "height": 540.0 })),
        ]
    );
    assert_eq!(intents[0].payload["options"], json!({ "duration": 150, "easing": "easeOut", "enabled": true }));

    assert_eq!(harness.geometries(&["c", "d", "e"]), before);
}
