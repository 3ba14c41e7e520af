//! Event bus ordering, wildcards and propagation, plus manager lifecycle events.

use std::sync::Arc;

use panes_lib::events::{Event, EventDispatcher};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::common::Harness;

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&'static str) -> Box<dyn Fn(&Event) + Send + Sync>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let make = move |tag: &'static str| -> Box<dyn Fn(&Event) + Send + Sync> {
        let sink = sink.clone();
        Box::new(move |_: &Event| sink.lock().push(tag.to_string()))
    };
    (log, make)
}

#[test]
fn test_priorities_fire_high_to_low() {
    let dispatcher = EventDispatcher::new();
    let (log, make) = recorder();

    dispatcher.listen("tick", -10, make("low"));
    dispatcher.listen("tick", 10, make("high"));
    dispatcher.listen("tick", 0, make("mid"));

    assert_eq!(dispatcher.dispatch("tick", Value::Null), 3);
    assert_eq!(*log.lock(), vec!["high", "mid", "low"]);
}

#[test]
fn test_prefix_wildcard_matching() {
    let dispatcher = EventDispatcher::new();
    let (log, make) = recorder();
    dispatcher.listen("user.*", 0, make("user"));

    dispatcher.dispatch("user.login", json!({ "name": "ada" }));
    dispatcher.dispatch("user.logout", Value::Null);
    dispatcher.dispatch("system.boot", Value::Null);
    dispatcher.dispatch("user", Value::Null);

    assert_eq!(log.lock().len(), 2);
}

#[test]
fn test_catch_all_runs_before_patterns() {
    let dispatcher = EventDispatcher::new();
    let (log, make) = recorder();
    dispatcher.listen("user.login", 100, make("exact"));
    dispatcher.listen("*", -5, make("all"));
    dispatcher.listen("user.*", 100, make("prefix"));

    dispatcher.dispatch("user.login", Value::Null);

    assert_eq!(*log.lock(), vec!["all", "exact", "prefix"]);
}

#[test]
fn test_stop_propagation_is_per_dispatch() {
    let dispatcher = EventDispatcher::new();
    let (log, make) = recorder();
    dispatcher.listen("save", 10, |event: &Event| event.stop_propagation());
    dispatcher.listen("save", 0, make("after"));

    assert_eq!(dispatcher.dispatch("save", Value::Null), 1);
    assert_eq!(dispatcher.dispatch("save", Value::Null), 1);
    assert!(log.lock().is_empty());

    dispatcher.listen("other", 0, make("other"));
    dispatcher.dispatch("other", Value::Null);
    assert_eq!(*log.lock(), vec!["other"]);
}

#[test]
fn test_dispatch_without_listeners() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.dispatch("nobody.home", Value::Null), 0);
    assert!(!dispatcher.has_listeners("nobody.home"));
}

#[test]
fn test_manager_lifecycle_events() {
    let mut harness = Harness::new();
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = names.clone();
    harness.events.listen("*", 0, move |event: &Event| sink.lock().push(event.name().to_string()));

    harness.manager.create("a", &panes_lib::window::WindowOptions::default()).unwrap();
    harness.manager.create_group("g").unwrap().add("a").unwrap().arrange_horizontal().unwrap();
    harness.manager.focus("a").unwrap();
    harness.manager.destroy("a").unwrap();
    harness.manager.remove_group("g").unwrap();

    let names = names.lock();
    for expected in ["window.created", "group.created", "group.layout-changed", "window.focused", "window.destroyed", "group.removed"] {
        assert!(names.iter().any(|name| name == expected), "missing {expected} in {names:?}");
    }
}
