//! Horizontal and vertical stacking.
//!
//! Stacking keeps each window's own size along the stacking axis and places
//! the windows edge to edge, starting at zero. The canvas is ignored and the
//! other axis is left untouched.

use super::LayoutResult;
use crate::window::{PartialRect, Rect, Window};

/// Places windows left to right: `x[i] = sum(width[0..i])`.
#[must_use]
pub fn horizontal(windows: &[&Window], _canvas: &Rect) -> LayoutResult {
    let mut x = 0.0;
    windows
        .iter()
        .map(|window| {
            let partial = PartialRect { x: Some(x), ..PartialRect::default() };
            x += window.geometry().width;
            (window.id().to_string(), partial)
        })
        .collect()
}

/// Places windows top to bottom: `y[i] = sum(height[0..i])`.
#[must_use]
pub fn vertical(windows: &[&Window], _canvas: &Rect) -> LayoutResult {
    let mut y = 0.0;
    windows
        .iter()
        .map(|window| {
            let partial = PartialRect { y: Some(y), ..PartialRect::default() };
            y += window.geometry().height;
            (window.id().to_string(), partial)
        })
        .collect()
}
