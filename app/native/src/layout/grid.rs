//! Grid layout - windows arranged in equal cells.
//!
//! Column count is `ceil(sqrt(n))` and row count `ceil(n / cols)`, so the
//! grid stays close to square and fills row by row. Trailing cells of the last
//! row stay empty.
//!
//! ```text
//! 5 windows (3 cols, 2 rows):
//! ┌───┬───┬───┐
//! │ 1 │ 2 │ 3 │
//! ├───┼───┼───┤
//! │ 4 │ 5 │   │
//! └───┴───┴───┘
//! ```

use super::LayoutResult;
use crate::window::{PartialRect, Rect, Window};

/// Returns `(cols, rows)` for `count` windows.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
#[must_use]
pub fn dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    (cols, count.div_ceil(cols))
}

/// Grid layout over the whole canvas.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn layout(windows: &[&Window], canvas: &Rect) -> LayoutResult {
    let (cols, rows) = dimensions(windows.len());
    if cols == 0 {
        return LayoutResult::new();
    }

    let cell_width = canvas.width / cols as f64;
    let cell_height = canvas.height / rows as f64;

    windows
        .iter()
        .enumerate()
        .map(|(index, window)| {
            let col = (index % cols) as f64;
            let row = (index / cols) as f64;
            let frame = Rect::new(
                col.mul_add(cell_width, canvas.x),
                row.mul_add(cell_height, canvas.y),
                cell_width,
                cell_height,
            );
            (window.id().to_string(), PartialRect::full(frame))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows(count: usize) -> Vec<Window> {
        (0..count).map(|i| Window::new(format!("w{i}"))).collect()
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(dimensions(0), (0, 0));
        assert_eq!(dimensions(1), (1, 1));
        assert_eq!(dimensions(2), (2, 1));
        assert_eq!(dimensions(3), (2, 2));
        assert_eq!(dimensions(4), (2, 2));
        assert_eq!(dimensions(5), (3, 2));
        assert_eq!(dimensions(9), (3, 3));
        assert_eq!(dimensions(10), (4, 3));
    }

    #[test]
    fn test_four_windows_quarter_canvas() {
        let owned = windows(4);
        let refs: Vec<&Window> = owned.iter().collect();
        let result = layout(&refs, &Rect::new(0.0, 0.0, 1920.0, 1080.0));

        let frames: Vec<PartialRect> = result.iter().map(|(_, p)| *p).collect();
        assert_eq!(frames[0], PartialRect::full(Rect::new(0.0, 0.0, 960.0, 540.0)));
        assert_eq!(frames[1], PartialRect::full(Rect::new(960.0, 0.0, 960.0, 540.0)));
        assert_eq!(frames[2], PartialRect::full(Rect::new(0.0, 540.0, 960.0, 540.0)));
        assert_eq!(frames[3], PartialRect::full(Rect::new(960.0, 540.0, 960.0, 540.0)));
    }

    #[test]
    fn test_five_windows_leave_last_cell_empty() {
        let owned = windows(5);
        let refs: Vec<&Window> = owned.iter().collect();
        let result = layout(&refs, &Rect::new(0.0, 0.0, 1500.0, 1000.0));

        assert_eq!(result.len(), 5);
        let last = result[4].1;
        assert_eq!(last.x, Some(500.0));
        assert_eq!(last.y, Some(500.0));
        assert_eq!(last.width, Some(500.0));
        assert_eq!(last.height, Some(500.0));
    }

    #[test]
    fn test_empty() {
        assert!(layout(&[], &Rect::new(0.0, 0.0, 100.0, 100.0)).is_empty());
    }
}
