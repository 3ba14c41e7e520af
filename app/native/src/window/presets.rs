//! Named window creation presets.
//!
//! A preset is a reusable [`WindowOptions`] value. Some built-ins span the
//! whole canvas along one axis (`sidebar` is full height, `toolbar` is full
//! width); those axes are resolved against the canvas when the preset is used.

use std::collections::BTreeMap;

use super::types::{Rect, TitleBarStyle, WindowOptions};
use crate::error::{PanesError, PanesResult};

/// Axis a preset stretches across the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Fill {
    #[default]
    None,
    Width,
    Height,
}

#[derive(Debug, Clone, PartialEq)]
struct Preset {
    options: WindowOptions,
    fill: Fill,
}

/// Registry of named window presets.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPresets {
    presets: BTreeMap<String, Preset>,
}

impl Default for WindowPresets {
    fn default() -> Self { Self::new() }
}

impl WindowPresets {
    /// Creates a registry holding the built-in presets.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self { presets: BTreeMap::new() };
        registry.register_builtins();
        registry
    }

    /// Registers (or replaces) a preset.
    pub fn define(&mut self, name: impl Into<String>, options: WindowOptions) -> &mut Self {
        self.presets.insert(name.into(), Preset { options, fill: Fill::None });
        self
    }

    /// Returns the stored options of a preset, unresolved.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WindowOptions> {
        self.presets.get(name).map(|preset| &preset.options)
    }

    /// Returns the options of a preset with canvas-relative sizes resolved.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::UnknownPreset`] if no preset is registered under `name`.
    pub fn resolve(&self, name: &str, canvas: &Rect) -> PanesResult<WindowOptions> {
        let preset =
            self.presets.get(name).ok_or_else(|| PanesError::UnknownPreset(name.to_string()))?;

        let mut options = preset.options.clone();
        match preset.fill {
            Fill::None => {}
            Fill::Width => options.width = Some(canvas.width),
            Fill::Height => options.height = Some(canvas.height),
        }
        Ok(options)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool { self.presets.contains_key(name) }

    /// Removes a preset. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool { self.presets.remove(name).is_some() }

    /// Registered preset names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> { self.presets.keys().map(String::as_str).collect() }

    /// Drops every custom preset and restores the built-ins.
    pub fn reset(&mut self) -> &mut Self {
        self.presets.clear();
        self.register_builtins();
        self
    }

    fn builtin(&mut self, name: &str, options: WindowOptions, fill: Fill) {
        self.presets.insert(name.to_string(), Preset { options, fill });
    }

    fn register_builtins(&mut self) {
        let fixed = |resizable: bool| WindowOptions {
            resizable: Some(resizable),
            maximizable: Some(false),
            minimizable: Some(false),
            ..WindowOptions::default()
        };

        self.builtin(
            "default",
            WindowOptions { resizable: Some(true), center: true, ..WindowOptions::sized(800.0, 600.0) },
            Fill::None,
        );
        self.builtin(
            "main",
            WindowOptions {
                resizable: Some(true),
                maximizable: Some(true),
                minimizable: Some(true),
                closable: Some(true),
                center: true,
                ..WindowOptions::sized(1200.0, 800.0)
            },
            Fill::None,
        );
        self.builtin(
            "dialog",
            WindowOptions {
                width: Some(500.0),
                height: Some(400.0),
                closable: Some(true),
                always_on_top: Some(true),
                center: true,
                ..fixed(false)
            },
            Fill::None,
        );
        self.builtin(
            "frameless",
            WindowOptions {
                resizable: Some(false),
                transparent: Some(true),
                title_bar_style: Some(TitleBarStyle::Hidden),
                ..WindowOptions::default()
            },
            Fill::None,
        );
        self.builtin(
            "sidebar",
            WindowOptions { x: Some(0.0), y: Some(0.0), width: Some(300.0), ..fixed(false) },
            Fill::Height,
        );
        self.builtin(
            "toolbar",
            WindowOptions {
                x: Some(0.0),
                y: Some(0.0),
                height: Some(40.0),
                always_on_top: Some(true),
                title_bar_style: Some(TitleBarStyle::Hidden),
                ..fixed(false)
            },
            Fill::Width,
        );
        self.builtin(
            "notification",
            WindowOptions {
                width: Some(300.0),
                height: Some(100.0),
                closable: Some(true),
                always_on_top: Some(true),
                title_bar_style: Some(TitleBarStyle::Hidden),
                ..fixed(false)
            },
            Fill::None,
        );
        self.builtin(
            "panel",
            WindowOptions {
                resizable: Some(true),
                maximizable: Some(false),
                minimizable: Some(true),
                closable: Some(true),
                always_on_top: Some(true),
                ..WindowOptions::sized(400.0, 300.0)
            },
            Fill::None,
        );
        self.builtin(
            "small",
            WindowOptions { resizable: Some(true), center: true, ..WindowOptions::sized(400.0, 300.0) },
            Fill::None,
        );
        self.builtin(
            "settings",
            WindowOptions { resizable: Some(true), center: true, ..WindowOptions::sized(800.0, 600.0) },
            Fill::None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    #[test]
    fn test_builtin_names() {
        let presets = WindowPresets::new();
        assert_eq!(
            presets.names(),
            vec![
                "default",
                "dialog",
                "frameless",
                "main",
                "notification",
                "panel",
                "settings",
                "sidebar",
                "small",
                "toolbar"
            ]
        );
    }

    #[test]
    fn test_dialog_is_fixed_and_centered() {
        let dialog = WindowPresets::new().resolve("dialog", &CANVAS).unwrap();
        assert_eq!(dialog.width, Some(500.0));
        assert_eq!(dialog.resizable, Some(false));
        assert_eq!(dialog.always_on_top, Some(true));
        assert!(dialog.center);
    }

    #[test]
    fn test_fill_axes_resolve_against_canvas() {
        let presets = WindowPresets::new();
        let sidebar = presets.resolve("sidebar", &CANVAS).unwrap();
        assert_eq!(sidebar.width, Some(300.0));
        assert_eq!(sidebar.height, Some(1080.0));

        let toolbar = presets.resolve("toolbar", &Rect::new(0.0, 0.0, 1280.0, 720.0)).unwrap();
        assert_eq!(toolbar.width, Some(1280.0));
        assert_eq!(toolbar.height, Some(40.0));
    }

    #[test]
    fn test_unknown_preset() {
        let err = WindowPresets::new().resolve("nope", &CANVAS).unwrap_err();
        assert_eq!(err, PanesError::UnknownPreset("nope".to_string()));
    }

    #[test]
    fn test_define_overrides_and_reset_restores() {
        let mut presets = WindowPresets::new();
        presets.define("sidebar", WindowOptions::sized(200.0, 500.0));
        presets.define("inspector", WindowOptions::sized(320.0, 640.0));

        let sidebar = presets.resolve("sidebar", &CANVAS).unwrap();
        assert_eq!(sidebar.height, Some(500.0));
        assert!(presets.has("inspector"));

        presets.reset();
        assert!(!presets.has("inspector"));
        assert_eq!(presets.resolve("sidebar", &CANVAS).unwrap().height, Some(1080.0));
    }

    #[test]
    fn test_remove() {
        let mut presets = WindowPresets::new();
        assert!(presets.remove("panel"));
        assert!(!presets.remove("panel"));
        assert!(presets.get("panel").is_none());
    }
}
