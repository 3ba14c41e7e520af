//! In-memory window entities.
//!
//! A [`Window`] is the orchestration layer's view of a host-shell window: its
//! geometry, size constraints and flags. Nothing here talks to the OS; the
//! host shell is told about changes through the IPC channel.
//!
//! Mutators take `&mut self` and return `&mut Self` so they chain, and each is
//! idempotent: applying the same call twice leaves the same state.

mod presets;
mod types;

use std::collections::BTreeMap;

pub use presets::WindowPresets;
pub use types::{
    Constraints, PartialRect, Rect, TitleBarStyle, WindowFlags, WindowId, WindowOptions,
    WindowSnapshot,
};

/// Windows keyed by id, in id order.
pub type WindowMap = BTreeMap<WindowId, Window>;

/// Default window width when neither options nor configuration provide one.
pub const DEFAULT_WIDTH: f64 = 800.0;

/// Default window height when neither options nor configuration provide one.
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// A managed window.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: WindowId,
    title: String,
    geometry: Rect,
    constraints: Constraints,
    flags: WindowFlags,
    title_bar_style: TitleBarStyle,
    vibrancy: Option<String>,
}

impl Window {
    /// Creates a window with default geometry and flags.
    #[must_use]
    pub fn new(id: impl Into<WindowId>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            geometry: Rect::new(0.0, 0.0, DEFAULT_WIDTH, DEFAULT_HEIGHT),
            constraints: Constraints::default(),
            flags: WindowFlags::default(),
            title_bar_style: TitleBarStyle::default(),
            vibrancy: None,
        }
    }

    /// Creates a window from typed options.
    ///
    /// Constraints are applied before the size so the initial size is clamped.
    /// `center` is ignored here since it needs a canvas; see [`Window::center_on`].
    #[must_use]
    pub fn from_options(id: impl Into<WindowId>, options: &WindowOptions) -> Self {
        let mut window = Self::new(id);
        window.apply_options(options);
        window
    }

    /// Writes every option that is set onto the window.
    pub fn apply_options(&mut self, options: &WindowOptions) -> &mut Self {
        if let Some(title) = &options.title {
            self.title = title.clone();
        }
        self.constraints = Constraints {
            min_width: options.min_width.or(self.constraints.min_width),
            min_height: options.min_height.or(self.constraints.min_height),
            max_width: options.max_width.or(self.constraints.max_width),
            max_height: options.max_height.or(self.constraints.max_height),
        };
        self.configure(&PartialRect {
            x: options.x,
            y: options.y,
            width: options.width.or(Some(self.geometry.width)),
            height: options.height.or(Some(self.geometry.height)),
        });

        let flags = &mut self.flags;
        let pairs = [
            (options.resizable, &mut flags.resizable),
            (options.movable, &mut flags.movable),
            (options.minimizable, &mut flags.minimizable),
            (options.maximizable, &mut flags.maximizable),
            (options.closable, &mut flags.closable),
            (options.always_on_top, &mut flags.always_on_top),
            (options.fullscreen, &mut flags.fullscreen),
            (options.kiosk, &mut flags.kiosk),
            (options.transparent, &mut flags.transparent),
            (options.focused, &mut flags.focused),
            (options.visible, &mut flags.visible),
        ];
        for (value, flag) in pairs {
            if let Some(value) = value {
                *flag = value;
            }
        }

        if let Some(style) = options.title_bar_style {
            self.title_bar_style = style;
        }
        if options.vibrancy.is_some() {
            self.vibrancy.clone_from(&options.vibrancy);
        }
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The window id (host-shell label).
    #[must_use]
    pub fn id(&self) -> &str { &self.id }

    /// The window title.
    #[must_use]
    pub fn title_text(&self) -> &str { &self.title }

    /// Current cached geometry.
    #[must_use]
    pub const fn geometry(&self) -> Rect { self.geometry }

    /// Size constraints.
    #[must_use]
    pub const fn constraints(&self) -> Constraints { self.constraints }

    /// Current flags.
    #[must_use]
    pub const fn flags(&self) -> WindowFlags { self.flags }

    /// Title bar style.
    #[must_use]
    pub const fn title_bar_style_value(&self) -> TitleBarStyle { self.title_bar_style }

    /// Vibrancy material, if any.
    #[must_use]
    pub fn vibrancy_value(&self) -> Option<&str> { self.vibrancy.as_deref() }

    /// Captures geometry and flags.
    #[must_use]
    pub const fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot { geometry: self.geometry, flags: self.flags }
    }

    /// Writes a snapshot back verbatim, without applying constraints.
    pub fn apply_snapshot(&mut self, snapshot: &WindowSnapshot) -> &mut Self {
        self.geometry = snapshot.geometry;
        self.flags = snapshot.flags;
        self
    }

    // ========================================================================
    // Geometry mutators
    // ========================================================================

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn x(&mut self, x: f64) -> &mut Self {
        self.geometry.x = x;
        self
    }

    pub fn y(&mut self, y: f64) -> &mut Self {
        self.geometry.y = y;
        self
    }

    pub fn position(&mut self, x: f64, y: f64) -> &mut Self { self.x(x).y(y) }

    /// Sets the width, clamped to the window's constraints.
    pub fn width(&mut self, width: f64) -> &mut Self {
        self.geometry.width = self.constraints.clamp_width(width);
        self
    }

    /// Sets the height, clamped to the window's constraints.
    pub fn height(&mut self, height: f64) -> &mut Self {
        self.geometry.height = self.constraints.clamp_height(height);
        self
    }

    pub fn size(&mut self, width: f64, height: f64) -> &mut Self { self.width(width).height(height) }

    /// Applies the fields set on a partial geometry update.
    pub fn configure(&mut self, partial: &PartialRect) -> &mut Self {
        if let Some(x) = partial.x {
            self.x(x);
        }
        if let Some(y) = partial.y {
            self.y(y);
        }
        if let Some(width) = partial.width {
            self.width(width);
        }
        if let Some(height) = partial.height {
            self.height(height);
        }
        self
    }

    /// Writes the fields set on `partial` verbatim, without applying
    /// constraints. Layout results and transition targets land here.
    pub fn place(&mut self, partial: &PartialRect) -> &mut Self {
        self.geometry = self.geometry.merged(partial);
        self
    }

    /// Replaces the geometry verbatim, without applying constraints.
    pub fn set_geometry(&mut self, geometry: Rect) -> &mut Self {
        self.geometry = geometry;
        self
    }

    /// Centers the window inside `canvas`, keeping its size.
    pub fn center_on(&mut self, canvas: &Rect) -> &mut Self {
        let x = canvas.x + (canvas.width - self.geometry.width) / 2.0;
        let y = canvas.y + (canvas.height - self.geometry.height) / 2.0;
        self.position(x, y)
    }

    pub fn min_width(&mut self, width: f64) -> &mut Self {
        self.constraints.min_width = Some(width);
        self.width(self.geometry.width)
    }

    pub fn min_height(&mut self, height: f64) -> &mut Self {
        self.constraints.min_height = Some(height);
        self.height(self.geometry.height)
    }

    pub fn max_width(&mut self, width: f64) -> &mut Self {
        self.constraints.max_width = Some(width);
        self.width(self.geometry.width)
    }

    pub fn max_height(&mut self, height: f64) -> &mut Self {
        self.constraints.max_height = Some(height);
        self.height(self.geometry.height)
    }

    // ========================================================================
    // Flag mutators
    // ========================================================================

    pub fn resizable(&mut self, resizable: bool) -> &mut Self {
        self.flags.resizable = resizable;
        self
    }

    pub fn movable(&mut self, movable: bool) -> &mut Self {
        self.flags.movable = movable;
        self
    }

    pub fn minimizable(&mut self, minimizable: bool) -> &mut Self {
        self.flags.minimizable = minimizable;
        self
    }

    pub fn maximizable(&mut self, maximizable: bool) -> &mut Self {
        self.flags.maximizable = maximizable;
        self
    }

    pub fn closable(&mut self, closable: bool) -> &mut Self {
        self.flags.closable = closable;
        self
    }

    pub fn always_on_top(&mut self, always_on_top: bool) -> &mut Self {
        self.flags.always_on_top = always_on_top;
        self
    }

    pub fn fullscreen(&mut self, fullscreen: bool) -> &mut Self {
        self.flags.fullscreen = fullscreen;
        self
    }

    pub fn kiosk(&mut self, kiosk: bool) -> &mut Self {
        self.flags.kiosk = kiosk;
        self
    }

    pub fn transparent(&mut self, transparent: bool) -> &mut Self {
        self.flags.transparent = transparent;
        self
    }

    pub fn focus(&mut self) -> &mut Self {
        self.flags.focused = true;
        self
    }

    pub fn blur(&mut self) -> &mut Self {
        self.flags.focused = false;
        self
    }

    pub fn show(&mut self) -> &mut Self {
        self.flags.visible = true;
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.flags.visible = false;
        self
    }

    pub fn title_bar_style(&mut self, style: TitleBarStyle) -> &mut Self {
        self.title_bar_style = style;
        self
    }

    pub fn vibrancy(&mut self, vibrancy: Option<String>) -> &mut Self {
        self.vibrancy = vibrancy;
        self
    }
}
