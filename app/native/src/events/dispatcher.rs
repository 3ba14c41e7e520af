//! Named publish/subscribe bus with priorities and wildcard patterns.
//!
//! # Dispatch Order
//!
//! A call to [`EventDispatcher::dispatch`] runs in two phases:
//!
//! 1. Listeners registered on the catch-all pattern `*`.
//! 2. Listeners whose pattern matches the event name, either exactly or via a
//!    trailing wildcard (`user.*` matches `user.login`).
//!
//! Within a phase, higher priorities fire first and equal priorities keep
//! registration order. Wildcards are resolved at dispatch time, so a pattern
//! registered late still matches every later dispatch.
//!
//! Any listener may call [`Event::stop_propagation`]; the remaining listeners
//! of that one dispatch are skipped. The flag lives on the per-dispatch
//! [`Event`] and never carries over to the next call.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// Pattern that receives every dispatched event.
const CATCH_ALL: &str = "*";

/// Suffix that turns a pattern into a prefix match.
const WILDCARD_SUFFIX: &str = ".*";

// ============================================================================
// Types
// ============================================================================

/// Handle returned by [`EventDispatcher::listen`], used to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A single dispatch, handed to every listener it reaches.
#[derive(Debug)]
pub struct Event {
    name: String,
    payload: Value,
    stopped: Cell<bool>,
}

impl Event {
    fn new(name: &str, payload: Value) -> Self {
        Self {
            name: name.to_string(),
            payload,
            stopped: Cell::new(false),
        }
    }

    /// The dispatched event name (not the listener's pattern).
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// The event payload.
    #[must_use]
    pub const fn payload(&self) -> &Value { &self.payload }

    /// Prevents the remaining listeners of this dispatch from running.
    pub fn stop_propagation(&self) { self.stopped.set(true); }

    /// Returns whether a listener has stopped propagation.
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool { self.stopped.get() }
}

/// Something that can be invoked with an [`Event`].
///
/// Implemented for every `Fn(&Event)` closure.
pub trait EventListener: Send + Sync {
    /// Handles one dispatched event.
    fn handle(&self, event: &Event);
}

impl<F> EventListener for F
where F: Fn(&Event) + Send + Sync
{
    fn handle(&self, event: &Event) { self(event) }
}

/// Read-only view of a registered listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerInfo {
    /// Listener handle.
    pub id: ListenerId,
    /// Pattern the listener was registered on.
    pub pattern: String,
    /// Dispatch priority (higher fires first).
    pub priority: i32,
    /// Whether the listener unregisters after its first invocation.
    pub once: bool,
}

#[derive(Clone)]
struct Registration {
    id: ListenerId,
    priority: i32,
    once: bool,
    listener: Arc<dyn EventListener>,
}

#[derive(Default)]
struct Registry {
    by_pattern: HashMap<String, Vec<Registration>>,
    next_id: u64,
}

impl Registry {
    fn insert(&mut self, pattern: &str, priority: i32, once: bool, listener: Arc<dyn EventListener>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.by_pattern.entry(pattern.to_string()).or_default().push(Registration {
            id,
            priority,
            once,
            listener,
        });
        id
    }

    /// Removes a listener by id, returning whether it was still registered.
    fn take(&mut self, pattern: &str, id: ListenerId) -> bool {
        let Some(registrations) = self.by_pattern.get_mut(pattern) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        let removed = registrations.len() != before;
        if registrations.is_empty() {
            self.by_pattern.remove(pattern);
        }
        removed
    }
}

/// Returns whether a listener pattern matches a dispatched event name.
///
/// The catch-all pattern is handled separately and never matches here.
fn pattern_matches(pattern: &str, name: &str) -> bool {
    if pattern == CATCH_ALL {
        return false;
    }
    if pattern == name {
        return true;
    }
    pattern.strip_suffix('*').is_some_and(|prefix| {
        pattern.ends_with(WILDCARD_SUFFIX) && name.len() > prefix.len() && name.starts_with(prefix)
    })
}

/// Sorts by descending priority, then registration order.
fn sort_for_dispatch(phase: &mut [(String, Registration)]) {
    phase.sort_by(|(_, a), (_, b)| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
}

// ============================================================================
// EventDispatcher
// ============================================================================

/// Priority/wildcard event bus.
///
/// Listeners are invoked without the internal lock held, so a listener may
/// register, remove or dispatch from inside its callback.
#[derive(Default)]
pub struct EventDispatcher {
    registry: Mutex<Registry>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.lock();
        f.debug_struct("EventDispatcher")
            .field("patterns", &registry.by_pattern.len())
            .finish_non_exhaustive()
    }
}

impl EventDispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers a listener on a pattern with the given priority.
    pub fn listen<L>(&self, pattern: &str, priority: i32, listener: L) -> ListenerId
    where L: EventListener + 'static {
        self.registry.lock().insert(pattern, priority, false, Arc::new(listener))
    }

    /// Registers a listener that unregisters itself after its first invocation.
    pub fn listen_once<L>(&self, pattern: &str, priority: i32, listener: L) -> ListenerId
    where L: EventListener + 'static {
        self.registry.lock().insert(pattern, priority, true, Arc::new(listener))
    }

    /// Dispatches an event to every matching listener.
    ///
    /// Dispatching to an event with no listeners is a no-op. Returns the
    /// number of listeners that were invoked.
    pub fn dispatch(&self, name: &str, payload: Value) -> usize {
        let (catch_all, matching) = {
            let registry = self.registry.lock();
            let mut catch_all: Vec<(String, Registration)> = registry
                .by_pattern
                .get(CATCH_ALL)
                .map(|regs| regs.iter().map(|r| (CATCH_ALL.to_string(), r.clone())).collect())
                .unwrap_or_default();
            let mut matching: Vec<(String, Registration)> = registry
                .by_pattern
                .iter()
                .filter(|(pattern, _)| pattern_matches(pattern, name))
                .flat_map(|(pattern, regs)| regs.iter().map(move |r| (pattern.clone(), r.clone())))
                .collect();
            sort_for_dispatch(&mut catch_all);
            sort_for_dispatch(&mut matching);
            (catch_all, matching)
        };

        let event = Event::new(name, payload);
        let mut invoked = 0;

        for (pattern, registration) in catch_all.iter().chain(matching.iter()) {
            if event.is_propagation_stopped() {
                tracing::trace!(event = name, "propagation stopped");
                break;
            }
            // One-shot listeners leave the registry before they run, so neither
            // the rest of this dispatch nor a nested one can reach them again.
            if registration.once && !self.registry.lock().take(pattern, registration.id) {
                continue;
            }
            registration.listener.handle(&event);
            invoked += 1;
        }

        tracing::trace!(event = name, invoked, "dispatched event");
        invoked
    }

    /// Removes every listener registered on exactly this pattern.
    pub fn remove(&self, pattern: &str) { self.registry.lock().by_pattern.remove(pattern); }

    /// Removes one listener, or every listener on the pattern when `id` is `None`.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_listener(&self, pattern: &str, id: Option<ListenerId>) -> bool {
        let mut registry = self.registry.lock();
        match id {
            Some(id) => registry.take(pattern, id),
            None => registry.by_pattern.remove(pattern).is_some(),
        }
    }

    /// Returns the listeners registered on exactly this pattern, in firing order.
    #[must_use]
    pub fn get_listeners(&self, pattern: &str) -> Vec<ListenerInfo> {
        let registry = self.registry.lock();
        let mut listeners: Vec<ListenerInfo> = registry
            .by_pattern
            .get(pattern)
            .map(|regs| {
                regs.iter()
                    .map(|r| ListenerInfo {
                        id: r.id,
                        pattern: pattern.to_string(),
                        priority: r.priority,
                        once: r.once,
                    })
                    .collect()
            })
            .unwrap_or_default();
        listeners.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
        listeners
    }

    /// Returns whether dispatching `name` would reach at least one listener.
    #[must_use]
    pub fn has_listeners(&self, name: &str) -> bool {
        let registry = self.registry.lock();
        registry
            .by_pattern
            .keys()
            .any(|pattern| pattern == CATCH_ALL || pattern_matches(pattern, name))
    }

    /// Removes every listener.
    pub fn clear(&self) { self.registry.lock().by_pattern.clear(); }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&Event) + Send + Sync>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = Arc::clone(&log);
        let make = move |tag: &str| {
            let log = Arc::clone(&log_clone);
            let tag = tag.to_string();
            Box::new(move |_: &Event| log.lock().push(tag.clone()))
                as Box<dyn Fn(&Event) + Send + Sync>
        };
        (log, make)
    }

    #[test]
    fn test_priority_order() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        dispatcher.listen("order", 0, make("zero"));
        dispatcher.listen("order", -10, make("low"));
        dispatcher.listen("order", 10, make("high"));

        dispatcher.dispatch("order", Value::Null);
        assert_eq!(*log.lock(), vec!["high", "zero", "low"]);
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        dispatcher.listen("tie", 5, make("first"));
        dispatcher.listen("tie", 5, make("second"));
        dispatcher.listen("tie", 5, make("third"));

        dispatcher.dispatch("tie", Value::Null);
        assert_eq!(*log.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_catch_all_fires_first_with_name() {
        let dispatcher = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_exact = Arc::clone(&seen);
        dispatcher.listen("app.ready", 100, move |e: &Event| {
            seen_exact.lock().push(format!("exact:{}", e.payload()["n"]));
        });
        let seen_all = Arc::clone(&seen);
        dispatcher.listen("*", -100, move |e: &Event| {
            seen_all.lock().push(format!("all:{}:{}", e.name(), e.payload()["n"]));
        });

        dispatcher.dispatch("app.ready", json!({ "n": 1 }));
        assert_eq!(*seen.lock(), vec!["all:app.ready:1", "exact:1"]);
    }

    #[test]
    fn test_wildcard_pattern_matching() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();
        dispatcher.listen("user.*", 0, make("user"));

        dispatcher.dispatch("user.login", Value::Null);
        dispatcher.dispatch("user.logout", Value::Null);
        dispatcher.dispatch("session.start", Value::Null);
        dispatcher.dispatch("user", Value::Null);

        assert_eq!(log.lock().len(), 2);
    }

    #[test]
    fn test_wildcard_registered_late_still_matches() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        dispatcher.dispatch("user.login", Value::Null);
        dispatcher.listen("user.*", 0, make("late"));
        dispatcher.dispatch("user.login", Value::Null);

        assert_eq!(*log.lock(), vec!["late"]);
    }

    #[test]
    fn test_stop_propagation_is_per_dispatch() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();
        let stop = Arc::new(std::sync::atomic::AtomicBool::new(true));

        let stop_clone = Arc::clone(&stop);
        dispatcher.listen("stop-event", 10, move |e: &Event| {
            if stop_clone.load(std::sync::atomic::Ordering::SeqCst) {
                e.stop_propagation();
            }
        });
        dispatcher.listen("stop-event", 0, make("later"));

        assert_eq!(dispatcher.dispatch("stop-event", Value::Null), 1);
        assert!(log.lock().is_empty());

        stop.store(false, std::sync::atomic::Ordering::SeqCst);
        assert_eq!(dispatcher.dispatch("stop-event", Value::Null), 2);
        assert_eq!(*log.lock(), vec!["later"]);
    }

    #[test]
    fn test_stop_propagation_in_catch_all_skips_exact() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        dispatcher.listen("*", 0, |e: &Event| e.stop_propagation());
        dispatcher.listen("anything", 0, make("exact"));

        dispatcher.dispatch("anything", Value::Null);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_once_listener_fires_once() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        dispatcher.listen_once("boot", 0, make("once"));
        dispatcher.listen("boot", 0, make("always"));

        dispatcher.dispatch("boot", Value::Null);
        dispatcher.dispatch("boot", Value::Null);

        assert_eq!(*log.lock(), vec!["once", "always", "always"]);
        assert_eq!(dispatcher.get_listeners("boot").len(), 1);
    }

    #[test]
    fn test_once_listener_unregistered_before_later_listeners() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let counts = Arc::new(Mutex::new(Vec::new()));

        dispatcher.listen_once("tick", 10, |_: &Event| {});
        let inner = Arc::clone(&dispatcher);
        let counts_clone = Arc::clone(&counts);
        dispatcher.listen("tick", 0, move |_: &Event| {
            counts_clone.lock().push(inner.get_listeners("tick").len());
        });

        dispatcher.dispatch("tick", Value::Null);
        assert_eq!(*counts.lock(), vec![1]);
    }

    #[test]
    fn test_dispatch_without_listeners_is_noop() {
        let dispatcher = EventDispatcher::new();
        assert_eq!(dispatcher.dispatch("nobody.home", json!({})), 0);
    }

    #[test]
    fn test_remove_listener_by_id() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        let keep = dispatcher.listen("evt", 0, make("keep"));
        let drop = dispatcher.listen("evt", 0, make("drop"));

        assert!(dispatcher.remove_listener("evt", Some(drop)));
        assert!(!dispatcher.remove_listener("evt", Some(drop)));
        dispatcher.dispatch("evt", Value::Null);

        assert_eq!(*log.lock(), vec!["keep"]);
        assert_eq!(dispatcher.get_listeners("evt")[0].id, keep);
    }

    #[test]
    fn test_remove_all_listeners() {
        let dispatcher = EventDispatcher::new();
        let (log, make) = recorder();

        dispatcher.listen("evt", 0, make("a"));
        dispatcher.listen("evt", 1, make("b"));
        dispatcher.listen("other", 0, make("other"));

        assert!(dispatcher.remove_listener("evt", None));
        dispatcher.dispatch("evt", Value::Null);
        assert!(log.lock().is_empty());

        dispatcher.remove("other");
        assert!(!dispatcher.has_listeners("other"));
    }

    #[test]
    fn test_get_listeners_in_firing_order() {
        let dispatcher = EventDispatcher::new();
        dispatcher.listen("evt", -1, |_: &Event| {});
        dispatcher.listen("evt", 3, |_: &Event| {});

        let listeners = dispatcher.get_listeners("evt");
        assert_eq!(listeners.len(), 2);
        assert_eq!(listeners[0].priority, 3);
        assert_eq!(listeners[1].priority, -1);
        assert!(dispatcher.get_listeners("missing").is_empty());
    }

    #[test]
    fn test_pattern_matches() {
        assert!(pattern_matches("user.login", "user.login"));
        assert!(pattern_matches("user.*", "user.login"));
        assert!(pattern_matches("user.*", "user.profile.updated"));
        assert!(!pattern_matches("user.*", "user."));
        assert!(!pattern_matches("user.*", "username.changed"));
        assert!(!pattern_matches("*", "anything"));
    }

    #[test]
    fn test_clear() {
        let dispatcher = EventDispatcher::new();
        dispatcher.listen("*", 0, |_: &Event| {});
        dispatcher.listen("a", 0, |_: &Event| {});
        dispatcher.clear();
        assert!(!dispatcher.has_listeners("a"));
    }
}
