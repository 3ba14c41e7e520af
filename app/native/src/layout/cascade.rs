//! Cascade layout - each window offset diagonally from the previous one.

use super::LayoutResult;
use crate::window::{PartialRect, Rect, Window};

/// Offset between consecutive windows, in both axes.
pub const CASCADE_OFFSET: f64 = 30.0;

/// Moves window `i` to `(30 * i, 30 * i)`, keeping sizes.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn layout(windows: &[&Window], _canvas: &Rect) -> LayoutResult {
    windows
        .iter()
        .enumerate()
        .map(|(index, window)| {
            let offset = CASCADE_OFFSET * index as f64;
            (window.id().to_string(), PartialRect::position(offset, offset))
        })
        .collect()
}
