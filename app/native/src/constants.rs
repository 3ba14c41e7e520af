//! Application-wide constants.

/// Application name, used for config and cache directories.
pub const APP_NAME: &str = "panes";

/// Default cache key under which group layouts are persisted.
pub const DEFAULT_STATE_CACHE_KEY: &str = "native_window_groups";

/// Default expiry of persisted group layouts (7 days).
pub const DEFAULT_STATE_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Default canvas width used by canvas-relative layouts.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1920.0;

/// Default canvas height used by canvas-relative layouts.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1080.0;
