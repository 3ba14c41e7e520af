//! Master layout - one master window with the rest stacked beside it.
//!
//! ```text
//! ┌──────────┬─────┐
//! │          │  2  │
//! │  Master  ├─────┤
//! │          │  3  │
//! └──────────┴─────┘
//! ```
//!
//! The stack column takes [`STACK_RATIO`] of the canvas width. A single window
//! fills the canvas.

use super::LayoutResult;
use crate::window::{PartialRect, Rect, Window};

/// Share of the canvas width given to the stack column.
pub const STACK_RATIO: f64 = 0.3;

#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn layout(windows: &[&Window], canvas: &Rect) -> LayoutResult {
    let Some((master, stack)) = windows.split_first() else {
        return LayoutResult::new();
    };

    let mut result = LayoutResult::new();
    if stack.is_empty() {
        result.push((master.id().to_string(), PartialRect::full(*canvas)));
        return result;
    }

    let master_width = canvas.width * (1.0 - STACK_RATIO);
    result.push((
        master.id().to_string(),
        PartialRect::full(Rect::new(canvas.x, canvas.y, master_width, canvas.height)),
    ));

    let stack_x = canvas.x + master_width;
    let stack_width = canvas.width - master_width;
    let stack_height = canvas.height / stack.len() as f64;
    for (i, window) in stack.iter().enumerate() {
        let y = (i as f64).mul_add(stack_height, canvas.y);
        result.push((
            window.id().to_string(),
            PartialRect::full(Rect::new(stack_x, y, stack_width, stack_height)),
        ));
    }
    result
}
