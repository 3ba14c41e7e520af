//! Window groups.
//!
//! A [`WindowGroup`] is an ordered set of window ids plus the name of the
//! layout last applied to it. Read access goes through `&WindowGroup`; every
//! mutation goes through a [`GroupMut`] handle obtained from the manager.
//!
//! # Handle Lifetime
//!
//! [`GroupMut`] takes the group out of the manager's registry while it is
//! alive and puts it back on drop. That lets one handle reach the windows,
//! the layout engine and other groups at the same time without aliasing.
//!
//! # Layout Application
//!
//! Layouts are planned first (every member resolved, the result validated)
//! and committed only when planning succeeds, so a failed call leaves every
//! window untouched. Listeners registered with
//! [`GroupMut::on_layout_change`] run after the commit, followed by a
//! `group.layout-changed` event on the manager's dispatcher.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use super::WindowManager;
use super::snapshot::{GroupLayoutExport, StoredGroupState};
use crate::cache::unix_timestamp;
use crate::error::{PanesError, PanesResult};
use crate::events::{self, EventDispatcher};
use crate::layout::{LayoutResult, names};
use crate::transition::{TransitionSpec, WindowTransition};
use crate::window::{WindowId, WindowMap};

/// Notification passed to layout change listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutChange {
    /// Group whose layout changed.
    pub group: String,
    /// Layout that was applied.
    pub layout: String,
    /// Whether the change was sent as transitions rather than written directly.
    pub animated: bool,
}

type LayoutListener = Arc<dyn Fn(&LayoutChange) + Send + Sync>;

// ============================================================================
// WindowGroup
// ============================================================================

/// Ordered set of window ids with a current layout.
#[derive(Default)]
pub struct WindowGroup {
    name: String,
    ids: Vec<WindowId>,
    layout: Option<String>,
    transition: Option<WindowTransition>,
    listeners: Vec<LayoutListener>,
    active: Option<WindowId>,
}

impl std::fmt::Debug for WindowGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowGroup")
            .field("name", &self.name)
            .field("ids", &self.ids)
            .field("layout", &self.layout)
            .field("transition", &self.transition.as_ref().map(WindowTransition::spec))
            .field("listeners", &self.listeners.len())
            .field("active", &self.active)
            .finish()
    }
}

impl WindowGroup {
    pub(super) fn new(name: &str) -> Self { Self { name: name.to_string(), ..Self::default() } }

    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Member ids in group order.
    #[must_use]
    pub fn ids(&self) -> &[WindowId] { &self.ids }

    #[must_use]
    pub fn has(&self, id: &str) -> bool { self.ids.iter().any(|member| member == id) }

    #[must_use]
    pub fn len(&self) -> usize { self.ids.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Name of the layout last applied, if any.
    #[must_use]
    pub fn layout_name(&self) -> Option<&str> { self.layout.as_deref() }

    /// Spec of the group's transition, if one was configured.
    #[must_use]
    pub fn transition_spec(&self) -> Option<TransitionSpec> {
        self.transition.as_ref().map(WindowTransition::spec)
    }

    /// The member most recently activated through cycling or `focus_active`.
    #[must_use]
    pub fn active(&self) -> Option<&str> { self.active.as_deref() }

    /// Drops a window id from the group.
    pub(super) fn evict(&mut self, id: &str) {
        self.ids.retain(|member| member != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    /// Runs listeners and publishes the change event.
    fn notify(&self, dispatcher: &EventDispatcher, layout: &str, animated: bool) {
        let change = LayoutChange { group: self.name.clone(), layout: layout.to_string(), animated };
        for listener in &self.listeners {
            listener(&change);
        }
        dispatcher.dispatch(
            events::group::LAYOUT_CHANGED,
            json!({ "group": self.name, "layout": layout, "animated": animated }),
        );
    }
}

// ============================================================================
// GroupMut
// ============================================================================

/// Mutable handle to a group.
///
/// Derefs to [`WindowGroup`] for read access.
pub struct GroupMut<'a> {
    manager: &'a mut WindowManager,
    group: WindowGroup,
}

impl std::fmt::Debug for GroupMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.group, f)
    }
}

impl std::ops::Deref for GroupMut<'_> {
    type Target = WindowGroup;

    fn deref(&self) -> &WindowGroup { &self.group }
}

impl Drop for GroupMut<'_> {
    fn drop(&mut self) { self.manager.put_group(std::mem::take(&mut self.group)); }
}

impl<'a> GroupMut<'a> {
    pub(super) fn take(manager: &'a mut WindowManager, name: &str) -> PanesResult<Self> {
        let group =
            manager.take_group(name).ok_or_else(|| PanesError::GroupNotFound(name.to_string()))?;
        Ok(Self { manager, group })
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Adds a window. Adding a member twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::WindowNotFound`] if the manager has no such window.
    pub fn add(&mut self, id: &str) -> PanesResult<&mut Self> {
        if !self.manager.contains(id) {
            return Err(PanesError::WindowNotFound(id.to_string()));
        }
        if !self.group.has(id) {
            self.group.ids.push(id.to_string());
            tracing::debug!(group = %self.group.name, window = %id, "window added to group");
        }
        Ok(self)
    }

    /// Removes a window from the group (the window itself survives).
    /// Removing a non-member is a no-op.
    pub fn remove(&mut self, id: &str) -> &mut Self {
        self.group.evict(id);
        self
    }

    // ========================================================================
    // Layouts
    // ========================================================================

    /// Applies a named layout to every member.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::UnknownLayout`] or [`PanesError::InvalidLayoutResult`];
    /// nothing is written in either case.
    pub fn apply_layout(&mut self, name: &str) -> PanesResult<LayoutResult> {
        let result = self.manager.engine.apply(name, &self.group.ids, &mut self.manager.windows)?;
        self.group.layout = Some(name.to_string());
        tracing::debug!(group = %self.group.name, layout = %name, "group layout applied");
        self.group.notify(&self.manager.events, name, false);
        Ok(result)
    }

    /// Places members side by side, keeping their widths.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout`].
    pub fn arrange_horizontal(&mut self) -> PanesResult<LayoutResult> { self.apply_layout(names::HORIZONTAL) }

    /// Stacks members top to bottom, keeping their heights.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout`].
    pub fn arrange_vertical(&mut self) -> PanesResult<LayoutResult> { self.apply_layout(names::VERTICAL) }

    /// Arranges members in equal grid cells.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout`].
    pub fn arrange_grid(&mut self) -> PanesResult<LayoutResult> { self.apply_layout(names::GRID) }

    /// Offsets members diagonally.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout`].
    pub fn cascade(&mut self) -> PanesResult<LayoutResult> { self.apply_layout(names::CASCADE) }

    /// Splits the canvas between exactly two members.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout`].
    pub fn split(&mut self) -> PanesResult<LayoutResult> { self.apply_layout(names::SPLIT) }

    /// Applies a named layout through the group's transition.
    ///
    /// With transitions enabled, one intent is sent per changed window and
    /// cached geometry stays as is until completions arrive. With transitions
    /// disabled this behaves like [`GroupMut::apply_layout`].
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout`]; no intent is sent on error.
    pub fn apply_layout_with_transition(&mut self, name: &str) -> PanesResult<LayoutResult> {
        let result = self.manager.engine.plan(name, &self.group.ids, &self.manager.windows)?;

        let manager = &mut *self.manager;
        let transition = self.group.transition.get_or_insert_with(|| manager.transition());
        for (id, partial) in &result {
            if let Some(window) = manager.windows.get_mut(id) {
                transition.layout(window, partial);
            }
        }
        let animated = transition.is_enabled();

        self.group.layout = Some(name.to_string());
        tracing::debug!(group = %self.group.name, layout = %name, animated, "group layout transitioned");
        self.group.notify(&self.manager.events, name, animated);
        Ok(result)
    }

    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout_with_transition`].
    pub fn arrange_horizontal_with_transition(&mut self) -> PanesResult<LayoutResult> {
        self.apply_layout_with_transition(names::HORIZONTAL)
    }

    /// # Errors
    ///
    /// Same as [`GroupMut::apply_layout_with_transition`].
    pub fn arrange_vertical_with_transition(&mut self) -> PanesResult<LayoutResult> {
        self.apply_layout_with_transition(names::VERTICAL)
    }

    /// Registers a listener run after every successful layout application.
    pub fn on_layout_change<F>(&mut self, listener: F) -> &mut Self
    where F: Fn(&LayoutChange) + Send + Sync + 'static {
        self.group.listeners.push(Arc::new(listener));
        self
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// The group's transition builder, created with the configured defaults
    /// on first use.
    pub fn transition(&mut self) -> &mut WindowTransition {
        let manager = &*self.manager;
        self.group.transition.get_or_insert_with(|| manager.transition())
    }

    /// Drops the group's transition; later `*_with_transition` calls start
    /// again from the configured defaults.
    pub fn clear_transition(&mut self) -> &mut Self {
        self.group.transition = None;
        self
    }

    // ========================================================================
    // Sync
    // ========================================================================

    /// Copies this group's layout (and transition spec, if any) to `target`
    /// and recomputes it for the target's own members.
    ///
    /// A group without a layout has nothing to sync.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::GroupNotFound`] for an unknown target, or the
    /// layout errors of the recomputation.
    pub fn sync_layout(&mut self, target: &str) -> PanesResult<()> { self.sync(target, false) }

    /// Like [`GroupMut::sync_layout`], routing the target's change through its
    /// transition.
    ///
    /// # Errors
    ///
    /// Same as [`GroupMut::sync_layout`].
    pub fn sync_layout_with_transition(&mut self, target: &str) -> PanesResult<()> { self.sync(target, true) }

    fn sync(&mut self, target: &str, animated: bool) -> PanesResult<()> {
        let Some(layout) = self.group.layout.clone() else {
            tracing::debug!(group = %self.group.name, "no layout to sync");
            return Ok(());
        };

        if target == self.group.name {
            return if animated {
                self.apply_layout_with_transition(&layout).map(drop)
            } else {
                self.apply_layout(&layout).map(drop)
            };
        }

        let spec = self.group.transition_spec();
        let mut other = GroupMut::take(self.manager, target)?;
        if let Some(spec) = spec {
            let ipc = other.manager.ipc.clone();
            other.group.transition = Some(WindowTransition::with_spec(ipc, spec));
        }
        if animated {
            other.apply_layout_with_transition(&layout)?;
        } else {
            other.apply_layout(&layout)?;
        }
        tracing::debug!(from = %self.group.name, to = %target, layout = %layout, "group layout synced");
        Ok(())
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Snapshots geometry and flags of every member.
    #[must_use]
    pub fn save_state(&self) -> StoredGroupState { snapshot(&self.group, &self.manager.windows) }

    /// Writes a snapshot back.
    ///
    /// Only windows present in both the group and the snapshot are touched;
    /// others are skipped. The layout name is restored when the snapshot has
    /// one. Geometry is never recomputed.
    pub fn restore_state(&mut self, state: &StoredGroupState) -> &mut Self {
        let mut restored = 0;
        for id in &self.group.ids {
            if let (Some(snapshot), Some(window)) = (state.windows.get(id), self.manager.windows.get_mut(id)) {
                window.apply_snapshot(snapshot);
                restored += 1;
            }
        }
        if state.layout.is_some() {
            self.group.layout.clone_from(&state.layout);
        }
        tracing::debug!(group = %self.group.name, restored, "group state restored");
        self
    }

    /// Exports the group's layout and member geometry.
    #[must_use]
    pub fn export_layout(&self) -> GroupLayoutExport {
        GroupLayoutExport {
            group: self.group.name.clone(),
            layout: self.group.layout.clone(),
            order: self.group.ids.clone(),
            windows: self
                .group
                .ids
                .iter()
                .filter_map(|id| self.manager.windows.get(id).map(|w| (id.clone(), w.geometry())))
                .collect(),
            timestamp: unix_timestamp(),
        }
    }

    /// Imports an exported layout.
    ///
    /// When the export has geometry for every member, that geometry is written
    /// verbatim. Otherwise the exported layout is recomputed for this group's
    /// members.
    ///
    /// # Errors
    ///
    /// Returns layout errors from the recomputation. A verbatim import cannot fail.
    pub fn import_layout(&mut self, export: &GroupLayoutExport) -> PanesResult<&mut Self> {
        if export.covers(&self.group.ids) {
            for id in &self.group.ids {
                if let (Some(rect), Some(window)) = (export.windows.get(id), self.manager.windows.get_mut(id)) {
                    window.set_geometry(*rect);
                }
            }
            self.group.layout.clone_from(&export.layout);
            if let Some(layout) = &export.layout {
                self.group.notify(&self.manager.events, layout, false);
            }
            tracing::debug!(group = %self.group.name, "layout imported verbatim");
        } else if let Some(layout) = &export.layout {
            self.apply_layout(layout)?;
        }
        Ok(self)
    }

    /// Writes [`GroupMut::export_layout`] to `path` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::Io`] or [`PanesError::Serialization`].
    pub fn export_layout_to_file(&self, path: &Path) -> PanesResult<()> {
        let json = serde_json::to_string_pretty(&self.export_layout())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads an export from `path` and imports it.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::Io`], [`PanesError::Serialization`], or the errors
    /// of [`GroupMut::import_layout`].
    pub fn import_layout_from_file(&mut self, path: &Path) -> PanesResult<&mut Self> {
        let json = std::fs::read_to_string(path)?;
        let export: GroupLayoutExport = serde_json::from_str(&json)?;
        self.import_layout(&export)
    }

    // ========================================================================
    // Active Window
    // ========================================================================

    /// Focuses the active member, defaulting to the first one.
    ///
    /// Returns the focused id, or `None` for an empty group.
    ///
    /// # Errors
    ///
    /// Propagates [`WindowManager::focus`] errors.
    pub fn focus_active(&mut self) -> PanesResult<Option<WindowId>> {
        let target = self.group.active.clone().or_else(|| self.group.ids.first().cloned());
        self.activate(target)
    }

    /// Activates and focuses the member after the active one, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates [`WindowManager::focus`] errors.
    pub fn next_window(&mut self) -> PanesResult<Option<WindowId>> {
        let len = self.group.ids.len();
        let target = match self.active_index() {
            Some(index) => self.group.ids.get((index + 1) % len).cloned(),
            None => self.group.ids.first().cloned(),
        };
        self.activate(target)
    }

    /// Activates and focuses the member before the active one, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates [`WindowManager::focus`] errors.
    pub fn previous_window(&mut self) -> PanesResult<Option<WindowId>> {
        let len = self.group.ids.len();
        let target = match self.active_index() {
            Some(index) => self.group.ids.get((index + len - 1) % len).cloned(),
            None => self.group.ids.last().cloned(),
        };
        self.activate(target)
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.group.active.as_deref()?;
        self.group.ids.iter().position(|id| id == active)
    }

    fn activate(&mut self, target: Option<WindowId>) -> PanesResult<Option<WindowId>> {
        if let Some(id) = &target {
            self.manager.focus(id)?;
        }
        self.group.active.clone_from(&target);
        Ok(target)
    }

    /// Destroys every member window through the manager.
    ///
    /// Returns the number of windows destroyed.
    pub fn close_all(&mut self) -> usize {
        let ids = std::mem::take(&mut self.group.ids);
        self.group.active = None;
        let mut closed = 0;
        for id in &ids {
            match self.manager.destroy(id) {
                Ok(_) => closed += 1,
                Err(error) => tracing::warn!(group = %self.group.name, window = %id, %error, "failed to close window"),
            }
        }
        closed
    }
}

/// Snapshot of a group's members.
pub(super) fn snapshot(group: &WindowGroup, windows: &WindowMap) -> StoredGroupState {
    StoredGroupState {
        windows: group
            .ids
            .iter()
            .filter_map(|id| windows.get(id).map(|w| (id.clone(), w.snapshot())))
            .collect(),
        layout: group.layout.clone(),
        timestamp: unix_timestamp(),
    }
}
