//! Window and group registry.
//!
//! The [`WindowManager`] owns every [`Window`] and every [`WindowGroup`].
//! Groups hold window ids, never windows, and the manager keeps the two in
//! sync: destroying a window evicts it from every group before the call
//! returns.
//!
//! Group operations go through [`GroupMut`], a handle that borrows the manager
//! mutably for as long as it lives.
//!
//! # Events
//!
//! Registry changes are published on the manager's [`EventDispatcher`]:
//!
//! | Event | Payload |
//! |-------|---------|
//! | `window.created` | `{ "window": id }` |
//! | `window.destroyed` | `{ "window": id }` |
//! | `window.focused` | `{ "window": id }` |
//! | `group.created` | `{ "group": name }` |
//! | `group.removed` | `{ "group": name }` |
//! | `group.layout-changed` | `{ "group": name, "layout": name, "animated": bool }` |

mod group;
mod snapshot;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use group::{GroupMut, LayoutChange, WindowGroup};
use serde_json::{Value, json};
pub use snapshot::{GroupLayoutExport, StoredGroupState};

use crate::config::PanesConfig;
use crate::error::{PanesError, PanesResult};
use crate::events::{self, EventDispatcher};
use crate::ipc::IpcChannel;
use crate::layout::LayoutPresetEngine;
use crate::transition::{TransitionPreset, TransitionSpec, WindowTransition};
use crate::window::{PartialRect, Rect, Window, WindowId, WindowMap, WindowOptions, WindowPresets};

/// Registry of windows and groups.
pub struct WindowManager {
    windows: WindowMap,
    groups: BTreeMap<String, WindowGroup>,
    engine: LayoutPresetEngine,
    presets: WindowPresets,
    ipc: Arc<IpcChannel>,
    events: Arc<EventDispatcher>,
    window_defaults: WindowOptions,
    transition_defaults: TransitionSpec,
    transition_presets: BTreeMap<String, TransitionPreset>,
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.windows.len())
            .field("groups", &self.groups.keys().collect::<Vec<_>>())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl WindowManager {
    /// Creates a manager with the default configuration.
    #[must_use]
    pub fn new(ipc: Arc<IpcChannel>, events: Arc<EventDispatcher>) -> Self {
        let config = PanesConfig::default();
        Self {
            windows: WindowMap::new(),
            groups: BTreeMap::new(),
            engine: LayoutPresetEngine::new(config.canvas.rect()),
            presets: WindowPresets::new(),
            ipc,
            events,
            window_defaults: config.window.options(),
            transition_defaults: TransitionSpec::default(),
            transition_presets: config.transitions.presets,
        }
    }

    /// Creates a manager from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::InvalidTransitionOptions`] if the transition
    /// defaults are invalid.
    pub fn with_config(
        config: &PanesConfig,
        ipc: Arc<IpcChannel>,
        events: Arc<EventDispatcher>,
    ) -> PanesResult<Self> {
        let mut manager = Self::new(ipc, events);
        manager.engine.set_canvas(config.canvas.rect());
        manager.window_defaults = config.window.options();
        manager.transition_defaults = config.transitions.spec()?;
        manager.transition_presets.clone_from(&config.transitions.presets);
        for (name, options) in &config.window_presets {
            manager.presets.define(name.clone(), options.clone());
        }
        Ok(manager)
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    #[must_use]
    pub const fn engine(&self) -> &LayoutPresetEngine { &self.engine }

    pub const fn engine_mut(&mut self) -> &mut LayoutPresetEngine { &mut self.engine }

    #[must_use]
    pub const fn presets(&self) -> &WindowPresets { &self.presets }

    pub const fn presets_mut(&mut self) -> &mut WindowPresets { &mut self.presets }

    #[must_use]
    pub const fn ipc(&self) -> &Arc<IpcChannel> { &self.ipc }

    #[must_use]
    pub const fn events(&self) -> &Arc<EventDispatcher> { &self.events }

    #[must_use]
    pub const fn canvas(&self) -> Rect { self.engine.canvas() }

    /// Configured transition presets.
    #[must_use]
    pub const fn transition_presets(&self) -> &BTreeMap<String, TransitionPreset> {
        &self.transition_presets
    }

    /// A new transition builder carrying the configured defaults.
    #[must_use]
    pub fn transition(&self) -> WindowTransition {
        WindowTransition::with_spec(self.ipc.clone(), self.transition_defaults)
    }

    // ========================================================================
    // Windows
    // ========================================================================

    /// Creates a window. Unset options fall back to the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::DuplicateId`] if a window with `id` exists.
    pub fn create(&mut self, id: &str, options: &WindowOptions) -> PanesResult<&mut Window> {
        if self.windows.contains_key(id) {
            return Err(PanesError::DuplicateId(id.to_string()));
        }

        let mut merged = self.window_defaults.merged(options);
        // An explicit size lowers the configured minimum instead of being clamped by it.
        if options.min_width.is_none()
            && let (Some(min), Some(width)) = (merged.min_width, options.width)
        {
            merged.min_width = Some(min.min(width));
        }
        if options.min_height.is_none()
            && let (Some(min), Some(height)) = (merged.min_height, options.height)
        {
            merged.min_height = Some(min.min(height));
        }

        let mut window = Window::from_options(id, &merged);
        if merged.center {
            window.center_on(&self.engine.canvas());
        }

        self.windows.insert(id.to_string(), window);
        tracing::debug!(window = %id, "window created");
        self.events.dispatch(events::window::CREATED, json!({ "window": id }));
        self.get_mut(id)
    }

    /// Creates a window from a named preset, with `overrides` on top.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::UnknownPreset`] or [`PanesError::DuplicateId`].
    pub fn create_from_preset(
        &mut self,
        preset: &str,
        id: &str,
        overrides: &WindowOptions,
    ) -> PanesResult<&mut Window> {
        let options = self.presets.resolve(preset, &self.engine.canvas())?.merged(overrides);
        self.create(id, &options)
    }

    /// Creates a centered, fixed-size dialog window.
    ///
    /// # Errors
    ///
    /// Same as [`WindowManager::create_from_preset`].
    pub fn create_dialog(&mut self, id: &str, title: &str) -> PanesResult<&mut Window> {
        let overrides = WindowOptions { title: Some(title.to_string()), ..WindowOptions::default() };
        self.create_from_preset("dialog", id, &overrides)
    }

    /// Creates a settings window.
    ///
    /// # Errors
    ///
    /// Same as [`WindowManager::create_from_preset`].
    pub fn create_settings(&mut self, id: &str) -> PanesResult<&mut Window> {
        let overrides = WindowOptions { title: Some("Settings".to_string()), ..WindowOptions::default() };
        self.create_from_preset("settings", id, &overrides)
    }

    /// Creates a small utility window.
    ///
    /// # Errors
    ///
    /// Same as [`WindowManager::create_from_preset`].
    pub fn create_small(&mut self, id: &str) -> PanesResult<&mut Window> {
        self.create_from_preset("small", id, &WindowOptions::default())
    }

    /// Creates several windows with the same options.
    ///
    /// Nothing is created if any id already exists or repeats.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::DuplicateId`] for the first conflicting id.
    pub fn create_many(&mut self, ids: &[&str], options: &WindowOptions) -> PanesResult<Vec<WindowId>> {
        for (index, id) in ids.iter().enumerate() {
            if self.windows.contains_key(*id) || ids[..index].contains(id) {
                return Err(PanesError::DuplicateId((*id).to_string()));
            }
        }
        for id in ids {
            self.create(id, options)?;
        }
        Ok(ids.iter().map(ToString::to_string).collect())
    }

    /// Returns a window.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] if no window has `id`.
    pub fn get(&self, id: &str) -> PanesResult<&Window> {
        self.windows.get(id).ok_or_else(|| PanesError::WindowNotFound(id.to_string()))
    }

    /// Returns a window for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] if no window has `id`.
    pub fn get_mut(&mut self, id: &str) -> PanesResult<&mut Window> {
        self.windows.get_mut(id).ok_or_else(|| PanesError::WindowNotFound(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool { self.windows.contains_key(id) }

    #[must_use]
    pub fn count(&self) -> usize { self.windows.len() }

    /// Every window, in id order.
    pub fn all(&self) -> impl Iterator<Item = &Window> { self.windows.values() }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> { self.windows.keys().map(String::as_str).collect() }

    /// Destroys a window and evicts it from every group.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] if no window has `id`.
    pub fn destroy(&mut self, id: &str) -> PanesResult<Window> {
        let window = self.windows.remove(id).ok_or_else(|| PanesError::WindowNotFound(id.to_string()))?;
        for group in self.groups.values_mut() {
            group.evict(id);
        }

        tracing::debug!(window = %id, "window destroyed");
        self.events.dispatch(events::window::DESTROYED, json!({ "window": id }));
        Ok(window)
    }

    /// Destroys several windows. Nothing is destroyed if any id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] for the first unknown id.
    pub fn destroy_many(&mut self, ids: &[&str]) -> PanesResult<usize> {
        if let Some(missing) = ids.iter().find(|id| !self.windows.contains_key(**id)) {
            return Err(PanesError::WindowNotFound((*missing).to_string()));
        }
        let mut destroyed = 0;
        for id in ids {
            // Repeated ids are already gone on their second occurrence.
            if self.windows.contains_key(*id) {
                self.destroy(id)?;
                destroyed += 1;
            }
        }
        Ok(destroyed)
    }

    /// Destroys every window. Groups survive, empty.
    pub fn close_all(&mut self) -> usize {
        let ids: Vec<WindowId> = self.windows.keys().cloned().collect();
        for id in &ids {
            if let Err(error) = self.destroy(id) {
                tracing::warn!(window = %id, %error, "failed to close window");
            }
        }
        ids.len()
    }

    /// Focuses one window and blurs every other.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] if no window has `id`.
    pub fn focus(&mut self, id: &str) -> PanesResult<()> {
        if !self.windows.contains_key(id) {
            return Err(PanesError::WindowNotFound(id.to_string()));
        }
        for (window_id, window) in &mut self.windows {
            if window_id == id {
                window.focus();
            } else {
                window.blur();
            }
        }
        self.events.dispatch(events::window::FOCUSED, json!({ "window": id }));
        Ok(())
    }

    /// Exchanges the geometry of two windows.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] if either window is missing.
    pub fn swap(&mut self, a: &str, b: &str) -> PanesResult<()> {
        let first = self.get(a)?.geometry();
        let second = self.get(b)?.geometry();
        self.get_mut(a)?.set_geometry(second);
        self.get_mut(b)?.set_geometry(first);
        Ok(())
    }

    /// Applies a host-shell transition completion to the cached geometry.
    ///
    /// `payload` is the body of a `window.transition.completed` message:
    /// `{ "window": { "label": id }, "to": { … } }`.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::Ipc`] for a malformed payload and
    /// [`PanesError::WindowNotFound`] for an unknown window.
    pub fn complete_transition(&mut self, payload: &Value) -> PanesResult<()> {
        let label = payload["window"]["label"]
            .as_str()
            .ok_or_else(|| PanesError::ipc("transition completion without window label"))?;
        let to: PartialRect = serde_json::from_value(payload["to"].clone())
            .map_err(|e| PanesError::ipc(format!("invalid transition target: {e}")))?;

        self.get_mut(label)?.place(&to);
        tracing::debug!(window = %label, "transition completed");
        Ok(())
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Creates an empty group and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::DuplicateGroup`] if the name is taken.
    pub fn create_group(&mut self, name: &str) -> PanesResult<GroupMut<'_>> {
        if self.groups.contains_key(name) {
            return Err(PanesError::DuplicateGroup(name.to_string()));
        }
        self.groups.insert(name.to_string(), WindowGroup::new(name));

        tracing::debug!(group = %name, "group created");
        self.events.dispatch(events::group::CREATED, json!({ "group": name }));
        self.group_mut(name)
    }

    /// Returns a group.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::GroupNotFound`] if no group has `name`.
    pub fn group(&self, name: &str) -> PanesResult<&WindowGroup> {
        self.groups.get(name).ok_or_else(|| PanesError::GroupNotFound(name.to_string()))
    }

    /// Returns a mutable handle to a group.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::GroupNotFound`] if no group has `name`.
    pub fn group_mut(&mut self, name: &str) -> PanesResult<GroupMut<'_>> { GroupMut::take(self, name) }

    #[must_use]
    pub fn has_group(&self, name: &str) -> bool { self.groups.contains_key(name) }

    /// Every group, in name order.
    pub fn groups(&self) -> impl Iterator<Item = &WindowGroup> { self.groups.values() }

    #[must_use]
    pub fn group_names(&self) -> Vec<&str> { self.groups.keys().map(String::as_str).collect() }

    /// Removes a group. Its windows are not destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::GroupNotFound`] if no group has `name`.
    pub fn remove_group(&mut self, name: &str) -> PanesResult<WindowGroup> {
        let group = self.groups.remove(name).ok_or_else(|| PanesError::GroupNotFound(name.to_string()))?;
        tracing::debug!(group = %name, "group removed");
        self.events.dispatch(events::group::REMOVED, json!({ "group": name }));
        Ok(group)
    }

    /// Snapshots every group, keyed by group name.
    #[must_use]
    pub fn save_all_states(&self) -> BTreeMap<String, StoredGroupState> {
        self.groups
            .iter()
            .map(|(name, group)| (name.clone(), group::snapshot(group, &self.windows)))
            .collect()
    }

    fn take_group(&mut self, name: &str) -> Option<WindowGroup> { self.groups.remove(name) }

    fn put_group(&mut self, group: WindowGroup) { self.groups.insert(group.name().to_string(), group); }
}
