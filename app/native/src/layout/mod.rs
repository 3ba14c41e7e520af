//! Named layout algorithms and the engine that applies them.
//!
//! A layout is a pure function from an ordered list of windows and the canvas
//! to a set of partial geometries. The [`LayoutPresetEngine`] keeps layouts by
//! name and applies their results to a [`WindowMap`] atomically: every target
//! window is resolved and every returned entry is validated before the first
//! geometry write.
//!
//! # Built-in Layouts
//!
//! - **horizontal**: keeps widths, places windows side by side from the left edge
//! - **vertical**: keeps heights, stacks windows from the top edge
//! - **grid**: `ceil(sqrt(n))` columns of equal cells
//! - **cascade**: each window offset 30px right and down from the previous one
//! - **split**: two windows as left/right halves (any other count is left alone)
//! - **master**: first window on the left, others stacked in a 30% right column
//!
//! # Performance
//!
//! Layout results use `SmallVec` so arrangements of up to 16 windows do not
//! allocate.

mod cascade;
mod grid;
mod master;
mod split;
mod stack;

use std::collections::{BTreeMap, HashSet};

use smallvec::SmallVec;

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::error::{PanesError, PanesResult};
use crate::window::{PartialRect, Rect, Window, WindowId, WindowMap};

// ============================================================================
// Layout Result
// ============================================================================

/// Inline capacity for layout results.
pub const LAYOUT_INLINE_CAP: usize = 16;

/// Partial geometry per window id, in window order.
pub type LayoutResult = SmallVec<[(WindowId, PartialRect); LAYOUT_INLINE_CAP]>;

/// Names of the built-in layouts.
pub mod names {
    pub const HORIZONTAL: &str = "horizontal";
    pub const VERTICAL: &str = "vertical";
    pub const GRID: &str = "grid";
    pub const CASCADE: &str = "cascade";
    pub const SPLIT: &str = "split";
    pub const MASTER: &str = "master";
}

// ============================================================================
// Layout Trait
// ============================================================================

/// A layout algorithm.
///
/// Implementations must be pure: the same windows and canvas always yield the
/// same result. Any `Fn(&[&Window], &Rect) -> LayoutResult` closure is a layout.
pub trait Layout: Send + Sync {
    /// Computes target geometry for `windows`, which are given in group order.
    fn arrange(&self, windows: &[&Window], canvas: &Rect) -> LayoutResult;
}

impl<F> Layout for F
where
    F: Fn(&[&Window], &Rect) -> LayoutResult + Send + Sync,
{
    fn arrange(&self, windows: &[&Window], canvas: &Rect) -> LayoutResult { self(windows, canvas) }
}

// ============================================================================
// Engine
// ============================================================================

/// Registry of named layouts bound to a canvas.
pub struct LayoutPresetEngine {
    layouts: BTreeMap<String, Box<dyn Layout>>,
    canvas: Rect,
}

impl std::fmt::Debug for LayoutPresetEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutPresetEngine")
            .field("layouts", &self.names())
            .field("canvas", &self.canvas)
            .finish()
    }
}

impl Default for LayoutPresetEngine {
    fn default() -> Self { Self::new(Rect::new(0.0, 0.0, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)) }
}

impl LayoutPresetEngine {
    /// Creates an engine with the built-in layouts registered.
    #[must_use]
    pub fn new(canvas: Rect) -> Self {
        let mut engine = Self { layouts: BTreeMap::new(), canvas };
        engine.register_builtins();
        engine
    }

    /// Registers a layout under `name`, replacing any previous one.
    pub fn define(&mut self, name: impl Into<String>, layout: impl Layout + 'static) -> &mut Self {
        let name = name.into();
        tracing::debug!(layout = %name, "layout defined");
        self.layouts.insert(name, Box::new(layout));
        self
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool { self.layouts.contains_key(name) }

    /// Removes a layout. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool { self.layouts.remove(name).is_some() }

    /// Registered layout names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> { self.layouts.keys().map(String::as_str).collect() }

    /// Drops custom layouts and re-registers the built-ins.
    pub fn reset(&mut self) -> &mut Self {
        self.layouts.clear();
        self.register_builtins();
        self
    }

    #[must_use]
    pub const fn canvas(&self) -> Rect { self.canvas }

    pub fn set_canvas(&mut self, canvas: Rect) -> &mut Self {
        self.canvas = canvas;
        self
    }

    /// Runs a layout without validating or committing its result.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::UnknownLayout`] if `name` is not registered.
    pub fn compute(&self, name: &str, windows: &[&Window]) -> PanesResult<LayoutResult> {
        let layout =
            self.layouts.get(name).ok_or_else(|| PanesError::UnknownLayout(name.to_string()))?;
        Ok(layout.arrange(windows, &self.canvas))
    }

    /// Resolves `ids`, runs the layout and validates the result, without
    /// touching any window.
    ///
    /// # Errors
    ///
    /// - [`PanesError::UnknownLayout`] if `name` is not registered
    /// - [`PanesError::WindowNotFound`] if an id is missing from `windows`
    /// - [`PanesError::InvalidLayoutResult`] if the layout returned geometry for
    ///   a window outside `ids`
    pub fn plan(
        &self,
        name: &str,
        ids: &[WindowId],
        windows: &WindowMap,
    ) -> PanesResult<LayoutResult> {
        if !self.has(name) {
            return Err(PanesError::UnknownLayout(name.to_string()));
        }

        let targets = ids
            .iter()
            .map(|id| windows.get(id).ok_or_else(|| PanesError::WindowNotFound(id.clone())))
            .collect::<PanesResult<Vec<_>>>()?;

        let result = self.compute(name, &targets)?;

        let allowed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        if let Some((stray, _)) = result.iter().find(|(id, _)| !allowed.contains(id.as_str())) {
            return Err(PanesError::InvalidLayoutResult {
                layout: name.to_string(),
                window: stray.clone(),
            });
        }

        Ok(result)
    }

    /// Applies a layout to the windows named by `ids`.
    ///
    /// Either every returned geometry is written or, on error, none is.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutPresetEngine::plan`].
    pub fn apply(
        &self,
        name: &str,
        ids: &[WindowId],
        windows: &mut WindowMap,
    ) -> PanesResult<LayoutResult> {
        let result = self.plan(name, ids, windows)?;
        commit(&result, windows);
        tracing::debug!(layout = %name, windows = result.len(), "layout applied");
        Ok(result)
    }

    fn register_builtins(&mut self) {
        self.define(names::HORIZONTAL, stack::horizontal);
        self.define(names::VERTICAL, stack::vertical);
        self.define(names::GRID, grid::layout);
        self.define(names::CASCADE, cascade::layout);
        self.define(names::SPLIT, split::layout);
        self.define(names::MASTER, master::layout);
    }
}

/// Writes a validated layout result onto the windows, verbatim.
pub(crate) fn commit(result: &LayoutResult, windows: &mut WindowMap) {
    for (id, partial) in result {
        if let Some(window) = windows.get_mut(id) {
            window.place(partial);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
