//! Event names and the event dispatch bus.
//!
//! All events published by Panes are defined here so the application and the
//! host shell agree on their names.
//!
//! ## Naming Convention
//!
//! Events follow the dotted pattern `<module>.<event-name>`, which lets a
//! listener subscribe to a whole module with a trailing wildcard such as
//! `window.*`.

mod dispatcher;

pub use dispatcher::{Event, EventDispatcher, EventListener, ListenerId, ListenerInfo};

/// Window registry events.
pub mod window {
    /// Emitted after a window is registered.
    ///
    /// Payload: `{ window: String }`
    pub const CREATED: &str = "window.created";

    /// Emitted after a window is destroyed and evicted from every group.
    ///
    /// Payload: `{ window: String }`
    pub const DESTROYED: &str = "window.destroyed";

    /// Emitted when a window receives focus through the manager.
    ///
    /// Payload: `{ window: String }`
    pub const FOCUSED: &str = "window.focused";
}

/// Window group events.
pub mod group {
    /// Emitted after a group is created.
    ///
    /// Payload: `{ group: String }`
    pub const CREATED: &str = "group.created";

    /// Emitted after a group is removed from the manager.
    ///
    /// Payload: `{ group: String }`
    pub const REMOVED: &str = "group.removed";

    /// Emitted once per successful layout application, after the commit.
    ///
    /// Payload: `{ group: String, layout: String, animated: bool }`
    pub const LAYOUT_CHANGED: &str = "group.layout-changed";
}

/// Channels exchanged with the host shell.
pub mod channel {
    /// Outbound transition intent.
    ///
    /// Payload: `{ window: { label }, from, to, options: { duration, easing, enabled } }`
    pub const TRANSITION: &str = "window.transition";

    /// Inbound completion of a transition, reported by the host shell.
    ///
    /// Payload: `{ window: { label }, to }`
    pub const TRANSITION_COMPLETED: &str = "window.transition.completed";
}
