//! Geometry, constraint and flag types shared by windows and layouts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier of a window (its label on the host shell side).
pub type WindowId = String;

// ============================================================================
// Geometry
// ============================================================================

/// A rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Rect {
    /// X coordinate of the origin (top-left corner).
    pub x: f64,
    /// Y coordinate of the origin (top-left corner).
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 { self.width * self.height }

    /// Returns this rectangle with the fields of `partial` written over it.
    #[must_use]
    pub fn merged(&self, partial: &PartialRect) -> Self {
        Self {
            x: partial.x.unwrap_or(self.x),
            y: partial.y.unwrap_or(self.y),
            width: partial.width.unwrap_or(self.width),
            height: partial.height.unwrap_or(self.height),
        }
    }
}

/// A geometry update where any field may be left untouched.
///
/// Layouts return these so that, for example, a horizontal arrangement can
/// move windows without touching their height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PartialRect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PartialRect {
    /// A partial update that sets every field.
    #[must_use]
    pub const fn full(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }

    /// A partial update that only moves.
    #[must_use]
    pub const fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), width: None, height: None }
    }

    /// A partial update that only resizes.
    #[must_use]
    pub const fn size(width: f64, height: f64) -> Self {
        Self { x: None, y: None, width: Some(width), height: Some(height) }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Picks from `rect` exactly the fields that are set on `self`.
    ///
    /// Used to describe the "from" side of a transition over the same subset
    /// of geometry as its target.
    #[must_use]
    pub fn project(&self, rect: &Rect) -> Self {
        Self {
            x: self.x.map(|_| rect.x),
            y: self.y.map(|_| rect.y),
            width: self.width.map(|_| rect.width),
            height: self.height.map(|_| rect.height),
        }
    }
}

impl From<Rect> for PartialRect {
    fn from(rect: Rect) -> Self { Self::full(rect) }
}

// ============================================================================
// Constraints & Flags
// ============================================================================

/// Size limits for a window. Unset limits are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
}

impl Constraints {
    /// Clamps a width into `[min_width, max_width]`. The minimum wins on conflict.
    #[must_use]
    pub fn clamp_width(&self, width: f64) -> f64 { clamp(width, self.min_width, self.max_width) }

    /// Clamps a height into `[min_height, max_height]`. The minimum wins on conflict.
    #[must_use]
    pub fn clamp_height(&self, height: f64) -> f64 {
        clamp(height, self.min_height, self.max_height)
    }
}

fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let value = max.map_or(value, |max| value.min(max));
    min.map_or(value, |min| value.max(min))
}

/// Behavioural and state flags of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct WindowFlags {
    pub resizable: bool,
    pub movable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
    pub closable: bool,
    pub always_on_top: bool,
    pub fullscreen: bool,
    pub kiosk: bool,
    pub transparent: bool,
    pub focused: bool,
    pub visible: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            resizable: true,
            movable: true,
            minimizable: true,
            maximizable: true,
            closable: true,
            always_on_top: false,
            fullscreen: false,
            kiosk: false,
            transparent: false,
            focused: false,
            visible: true,
        }
    }
}

/// Title bar presentation requested from the host shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TitleBarStyle {
    /// Regular title bar.
    #[default]
    Visible,
    /// No title bar.
    Hidden,
    /// Content extends under a transparent title bar.
    Overlay,
}

/// Geometry plus flags of one window, as captured in a group snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WindowSnapshot {
    #[serde(flatten)]
    pub geometry: Rect,
    #[serde(flatten)]
    pub flags: WindowFlags,
}

// ============================================================================
// Options
// ============================================================================

/// Typed window creation options.
///
/// Every field is optional; unset fields fall back to the configured window
/// defaults. [`WindowOptions::merged`] layers one set of options over another,
/// which is how presets, configured defaults and per-call options combine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimizable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximizable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_on_top: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullscreen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_bar_style: Option<TitleBarStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrancy: Option<String>,
    /// Center the window on the canvas after sizing it.
    pub center: bool,
}

impl WindowOptions {
    /// Convenience constructor for options that only set a size.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    /// Returns `self` with every field set on `overrides` written over it.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        Self {
            title: overrides.title.clone().or_else(|| self.title.clone()),
            x: overrides.x.or(self.x),
            y: overrides.y.or(self.y),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            min_width: overrides.min_width.or(self.min_width),
            min_height: overrides.min_height.or(self.min_height),
            max_width: overrides.max_width.or(self.max_width),
            max_height: overrides.max_height.or(self.max_height),
            resizable: overrides.resizable.or(self.resizable),
            movable: overrides.movable.or(self.movable),
            minimizable: overrides.minimizable.or(self.minimizable),
            maximizable: overrides.maximizable.or(self.maximizable),
            closable: overrides.closable.or(self.closable),
            always_on_top: overrides.always_on_top.or(self.always_on_top),
            fullscreen: overrides.fullscreen.or(self.fullscreen),
            kiosk: overrides.kiosk.or(self.kiosk),
            transparent: overrides.transparent.or(self.transparent),
            focused: overrides.focused.or(self.focused),
            visible: overrides.visible.or(self.visible),
            title_bar_style: overrides.title_bar_style.or(self.title_bar_style),
            vibrancy: overrides.vibrancy.clone().or_else(|| self.vibrancy.clone()),
            center: overrides.center || self.center,
        }
    }
}
