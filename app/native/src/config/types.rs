//! Configuration types for Panes.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Keys are camelCase.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_STATE_CACHE_KEY, DEFAULT_STATE_EXPIRY_SECS,
};
use crate::error::PanesResult;
use crate::transition::{DEFAULT_DURATION_MS, TransitionPreset, TransitionSpec};
use crate::window::{Rect, WindowOptions};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PanesConfig {
    /// Area available to canvas-relative layouts and presets.
    pub canvas: CanvasConfig,

    /// Defaults applied to every new window before its own options.
    pub window: WindowDefaults,

    /// Defaults for window transitions.
    pub transitions: TransitionsConfig,

    /// Persistence of group layouts.
    pub state: StateConfig,

    /// Extra window presets. A name that matches a built-in replaces it.
    pub window_presets: BTreeMap<String, WindowOptions>,
}

/// Canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Canvas width in pixels (default 1920).
    pub width: f64,
    /// Canvas height in pixels (default 1080).
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT }
    }
}

impl CanvasConfig {
    /// The canvas as a rectangle anchored at the origin.
    #[must_use]
    pub const fn rect(&self) -> Rect { Rect::new(0.0, 0.0, self.width, self.height) }
}

/// Window creation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowDefaults {
    /// Default title (default "Panes").
    pub title: String,
    /// Default width (default 800).
    pub width: f64,
    /// Default height (default 600).
    pub height: f64,
    /// Minimum width (default 400).
    pub min_width: Option<f64>,
    /// Minimum height (default 400).
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
    /// Whether new windows are resizable (default true).
    pub resizable: bool,
    /// Whether new windows start fullscreen (default false).
    pub fullscreen: bool,
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            title: "Panes".to_string(),
            width: 800.0,
            height: 600.0,
            min_width: Some(400.0),
            min_height: Some(400.0),
            max_width: None,
            max_height: None,
            resizable: true,
            fullscreen: false,
        }
    }
}

impl WindowDefaults {
    /// The defaults as window options, to be merged under per-call options.
    #[must_use]
    pub fn options(&self) -> WindowOptions {
        WindowOptions {
            title: Some(self.title.clone()),
            width: Some(self.width),
            height: Some(self.height),
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
            resizable: Some(self.resizable),
            fullscreen: Some(self.fullscreen),
            ..WindowOptions::default()
        }
    }
}

/// Transition defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionsConfig {
    /// Whether transitions are sent to the host shell (default true).
    pub enabled: bool,
    /// Duration in milliseconds (default 300).
    pub duration: i64,
    /// Easing curve: "linear", "easeIn", "easeOut", "easeInOut",
    /// "easeInOutCubic" or "easeOutBounce" (kebab-case also accepted).
    pub easing: String,
    /// Named partial overrides usable with `use_preset`.
    pub presets: BTreeMap<String, TransitionPreset>,
}

impl Default for TransitionsConfig {
    #[allow(clippy::cast_possible_wrap)]
    fn default() -> Self {
        let preset = |duration: i64, easing: &str| TransitionPreset {
            duration: Some(duration),
            easing: Some(easing.to_string()),
            enabled: None,
        };
        Self {
            enabled: true,
            duration: DEFAULT_DURATION_MS as i64,
            easing: "linear".to_string(),
            presets: BTreeMap::from([
                ("fast".to_string(), preset(150, "easeOut")),
                ("slow".to_string(), preset(600, "easeInOut")),
                ("bounce".to_string(), preset(500, "easeOutBounce")),
            ]),
        }
    }
}

impl TransitionsConfig {
    /// Validates the defaults into a [`TransitionSpec`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransitionOptions` for a negative duration or an
    /// unknown easing.
    pub fn spec(&self) -> PanesResult<TransitionSpec> {
        TransitionSpec::validate(self.duration, &self.easing, self.enabled)
    }
}

/// Group layout persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StateConfig {
    /// Cache key holding every saved group (default "native_window_groups").
    pub cache_key: String,
    /// Expiry in seconds; `null` keeps saved layouts forever (default 7 days).
    pub expire_seconds: Option<u64>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_STATE_CACHE_KEY.to_string(),
            expire_seconds: Some(DEFAULT_STATE_EXPIRY_SECS),
        }
    }
}
