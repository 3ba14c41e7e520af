//! Split layout - two windows side by side.
//!
//! Only defined for exactly two windows. Any other count produces an empty
//! result, which leaves every window where it is.

use super::LayoutResult;
use crate::window::{PartialRect, Rect, Window};

#[must_use]
pub fn layout(windows: &[&Window], canvas: &Rect) -> LayoutResult {
    let [left, right] = windows else {
        return LayoutResult::new();
    };

    let half = canvas.width / 2.0;
    let mut result = LayoutResult::new();
    result.push((
        left.id().to_string(),
        PartialRect::full(Rect::new(canvas.x, canvas.y, half, canvas.height)),
    ));
    result.push((
        right.id().to_string(),
        PartialRect::full(Rect::new(canvas.x + half, canvas.y, half, canvas.height)),
    ));
    result
}
