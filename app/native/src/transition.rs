//! Animated geometry changes delegated to the host shell.
//!
//! A [`WindowTransition`] turns a geometry change into a `window.transition`
//! intent instead of writing it locally. The host shell animates the window
//! and reports back through `window.transition.completed`; until then the
//! window's cached geometry stays at its pre-transition value.
//!
//! When the transition is disabled the change is written straight onto the
//! window and nothing is sent.
//!
//! # Intent Payload
//!
//! ```json
//! {
//!   "window": { "label": "main" },
//!   "from": { "x": 0, "y": 0 },
//!   "to": { "x": 100, "y": 50 },
//!   "options": { "duration": 300, "easing": "linear", "enabled": true }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{PanesError, PanesResult};
use crate::events::channel;
use crate::ipc::IpcChannel;
use crate::window::{PartialRect, Window};

/// Default transition duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 300;

// ============================================================================
// Easing
// ============================================================================

/// Easing curve requested from the host shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
    /// Cubic slow start and end.
    EaseInOutCubic,
    /// Overshoots the end and settles with decaying bounces.
    EaseOutBounce,
}

impl Easing {
    /// Every supported curve.
    pub const ALL: [Self; 6] = [
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::EaseInOutCubic,
        Self::EaseOutBounce,
    ];

    /// The camelCase name sent to the host shell.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::EaseInOutCubic => "easeInOutCubic",
            Self::EaseOutBounce => "easeOutBounce",
        }
    }

    /// Evaluates the curve at progress `t` in `0.0..=1.0`.
    ///
    /// The shell does the real animation; this is used to preview curves.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    (4.0 - 2.0 * t).mul_add(t, -1.0)
                }
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = 2.0f64.mul_add(t, -2.0);
                    (0.5 * t1 * t1).mul_add(t1, 1.0)
                }
            }
            Self::EaseOutBounce => bounce_out(t),
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        (N * t).mul_add(t, 0.75)
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        (N * t).mul_add(t, 0.9375)
    } else {
        let t = t - 2.625 / D;
        (N * t).mul_add(t, 0.984_375)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Easing {
    type Err = PanesError;

    /// Parses camelCase (`easeInOut`) or kebab-case (`ease-in-out`) names,
    /// ignoring case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            name.chars().filter(|c| !matches!(c, '-' | '_')).collect::<String>().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|easing| easing.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| PanesError::invalid_transition(format!("unknown easing '{name}'")))
    }
}

impl TryFrom<String> for Easing {
    type Error = PanesError;

    fn try_from(name: String) -> Result<Self, Self::Error> { name.parse() }
}

// ============================================================================
// TransitionSpec
// ============================================================================

/// Duration, easing and on/off switch of a transition.
///
/// Serialized as the `options` object of a transition intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Duration in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub easing: Easing,
    pub enabled: bool,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self { duration_ms: DEFAULT_DURATION_MS, easing: Easing::Linear, enabled: true }
    }
}

impl TransitionSpec {
    /// Builds a spec from unchecked values.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::InvalidTransitionOptions`] for a negative duration
    /// or an unknown easing name.
    pub fn validate(duration_ms: i64, easing: &str, enabled: bool) -> PanesResult<Self> {
        Ok(Self { duration_ms: checked_duration(duration_ms)?, easing: easing.parse()?, enabled })
    }
}

fn checked_duration(duration_ms: i64) -> PanesResult<u64> {
    u64::try_from(duration_ms).map_err(|_| {
        PanesError::invalid_transition(format!("duration must be >= 0, got {duration_ms}"))
    })
}

/// Partial override of a [`TransitionSpec`], as stored in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPreset {
    /// Duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Easing name (camelCase or kebab-case).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl TransitionPreset {
    /// Returns `spec` with this preset's fields applied.
    ///
    /// # Errors
    ///
    /// Same as [`TransitionSpec::validate`].
    pub fn merge_into(&self, spec: TransitionSpec) -> PanesResult<TransitionSpec> {
        Ok(TransitionSpec {
            duration_ms: self.duration.map(checked_duration).transpose()?.unwrap_or(spec.duration_ms),
            easing: self.easing.as_deref().map(str::parse).transpose()?.unwrap_or(spec.easing),
            enabled: self.enabled.unwrap_or(spec.enabled),
        })
    }
}

// ============================================================================
// WindowTransition
// ============================================================================

/// Transition builder bound to an IPC channel.
#[derive(Debug, Clone)]
pub struct WindowTransition {
    spec: TransitionSpec,
    ipc: Arc<IpcChannel>,
}

impl WindowTransition {
    /// Creates a transition with the default spec.
    #[must_use]
    pub fn new(ipc: Arc<IpcChannel>) -> Self { Self::with_spec(ipc, TransitionSpec::default()) }

    #[must_use]
    pub const fn with_spec(ipc: Arc<IpcChannel>, spec: TransitionSpec) -> Self { Self { spec, ipc } }

    #[must_use]
    pub const fn spec(&self) -> TransitionSpec { self.spec }

    pub fn set_spec(&mut self, spec: TransitionSpec) -> &mut Self {
        self.spec = spec;
        self
    }

    /// Sets the duration in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::InvalidTransitionOptions`] if `ms` is negative.
    pub fn duration(&mut self, ms: i64) -> PanesResult<&mut Self> {
        self.spec.duration_ms = checked_duration(ms)?;
        Ok(self)
    }

    /// Sets the easing curve by name.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::InvalidTransitionOptions`] for an unknown name.
    pub fn easing(&mut self, name: &str) -> PanesResult<&mut Self> {
        self.spec.easing = name.parse()?;
        Ok(self)
    }

    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.spec.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.spec.enabled }

    /// Merges a named preset into the current spec.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::InvalidTransitionOptions`] if the preset is unknown
    /// or holds invalid values.
    pub fn use_preset(
        &mut self,
        name: &str,
        presets: &BTreeMap<String, TransitionPreset>,
    ) -> PanesResult<&mut Self> {
        let preset = presets
            .get(name)
            .ok_or_else(|| PanesError::invalid_transition(format!("unknown transition preset '{name}'")))?;
        self.spec = preset.merge_into(self.spec)?;
        Ok(self)
    }

    /// Moves a window to `(x, y)`.
    ///
    /// Returns `true` if an intent was sent, `false` if the move was applied
    /// directly.
    pub fn move_to(&self, window: &mut Window, x: f64, y: f64) -> bool {
        self.layout(window, &PartialRect::position(x, y))
    }

    /// Resizes a window to `width` x `height`.
    pub fn resize_to(&self, window: &mut Window, width: f64, height: f64) -> bool {
        self.layout(window, &PartialRect::size(width, height))
    }

    /// Transitions any subset of a window's geometry.
    ///
    /// `to` is sent and later committed as given, the same way a layout
    /// result is written.
    pub fn layout(&self, window: &mut Window, to: &PartialRect) -> bool {
        if to.is_empty() {
            return false;
        }
        if !self.spec.enabled {
            window.place(to);
            return false;
        }

        let from = to.project(&window.geometry());

        tracing::debug!(window = %window.id(), easing = %self.spec.easing, duration = self.spec.duration_ms, "transition intent");
        self.ipc.send(
            channel::TRANSITION,
            json!({
                "window": { "label": window.id() },
                "from": from,
                "to": to,
                "options": self.spec,
            }),
        );
        true
    }
}
