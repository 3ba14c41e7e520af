//! Layout application through window groups.

use panes_lib::PanesError;
use panes_lib::layout::LayoutResult;
use panes_lib::window::{PartialRect, Rect, Window};

use crate::common::Harness;

#[test]
fn test_horizontal_is_prefix_sum_of_widths() {
    let cases: [&[f64]; 3] = [&[500.0, 700.0, 600.0], &[410.0], &[400.0, 400.0, 950.0, 1200.0, 450.0]];

    for widths in cases {
        let ids: Vec<String> = (0..widths.len()).map(|i| format!("w{i}")).collect();
        let windows: Vec<(&str, f64, f64)> =
            ids.iter().zip(widths).map(|(id, width)| (id.as_str(), *width, 500.0)).collect();
        let mut harness = Harness::with_group("row", &windows);

        harness.manager.group_mut("row").unwrap().arrange_horizontal().unwrap();

        let mut expected_x = 0.0;
        for (id, width) in ids.iter().zip(widths) {
            let rect = harness.geometry(id);
            assert!((rect.x - expected_x).abs() < f64::EPSILON, "{id}: x={} expected {expected_x}", rect.x);
            assert!((rect.width - width).abs() < f64::EPSILON);
            expected_x += width;
        }
    }
}

#[test]
fn test_vertical_keeps_x() {
    let mut harness = Harness::with_group("col", &[("a", 500.0, 450.0), ("b", 500.0, 420.0)]);
    harness.manager.get_mut("a").unwrap().x(250.0);

    harness.manager.group_mut("col").unwrap().arrange_vertical().unwrap();

    assert_eq!(harness.geometry("a"), Rect::new(250.0, 0.0, 500.0, 450.0));
    assert_eq!(harness.geometry("b"), Rect::new(0.0, 450.0, 500.0, 420.0));
}

#[test]
fn test_failed_layout_changes_nothing() {
    let mut harness = Harness::with_group("g", &[("a", 500.0, 450.0), ("b", 600.0, 450.0)]);
    harness.manager.engine_mut().define("rogue", |windows: &[&Window], _: &Rect| -> LayoutResult {
        let mut result: LayoutResult =
            windows.iter().map(|w| (w.id().to_string(), PartialRect::position(5.0, 5.0))).collect();
        result.push(("stranger".to_string(), PartialRect::position(0.0, 0.0)));
        result
    });
    let before = harness.geometries(&["a", "b"]);

    let err = harness.manager.group_mut("g").unwrap().apply_layout("rogue").unwrap_err();

    assert!(matches!(err, PanesError::InvalidLayoutResult { .. }));
    assert_eq!(harness.geometries(&["a", "b"]), before);
    assert!(harness.manager.group("g").unwrap().layout_name().is_none());
}

#[test]
fn test_custom_layout_via_engine() {
    let mut harness = Harness::with_group("g", &[("a", 500.0, 450.0), ("b", 600.0, 450.0)]);
    harness.manager.engine_mut().define("diagonal", |windows: &[&Window], canvas: &Rect| -> LayoutResult {
        windows
            .iter()
            .enumerate()
            .map(|(i, w)| {
                #[allow(clippy::cast_precision_loss)]
                let step = 100.0 * i as f64;
                (w.id().to_string(), PartialRect::position(canvas.x + step, canvas.y + step))
            })
            .collect()
    });

    harness.manager.group_mut("g").unwrap().apply_layout("diagonal").unwrap();

    assert_eq!(harness.geometry("b"), Rect::new(100.0, 100.0, 600.0, 450.0));
    assert_eq!(harness.manager.group("g").unwrap().layout_name(), Some("diagonal"));
}

#[test]
fn test_master_layout_on_canvas() {
    let mut harness =
        Harness::with_group("g", &[("main", 800.0, 600.0), ("side1", 800.0, 600.0), ("side2", 800.0, 600.0)]);
    harness.manager.group_mut("g").unwrap().apply_layout("master").unwrap();

    let main = harness.geometry("main");
    let side2 = harness.geometry("side2");
    assert!((main.width - 1920.0 * 0.7).abs() < 1e-9);
    assert!((main.height - 1080.0).abs() < f64::EPSILON);
    assert!((side2.x - 1920.0 * 0.7).abs() < 1e-9);
    assert!((side2.y - 540.0).abs() < f64::EPSILON);
}

#[test]
fn test_destroyed_window_leaves_groups() {
    let mut harness = Harness::with_group("g", &[("a", 500.0, 450.0), ("b", 600.0, 450.0)]);
    let mut other = harness.manager.create_group("other").unwrap();
    other.add("b").unwrap();
    drop(other);

    harness.manager.destroy("b").unwrap();

    assert_eq!(harness.manager.group("g").unwrap().ids(), ["a".to_string()]);
    assert!(harness.manager.group("other").unwrap().is_empty());
    harness.manager.group_mut("g").unwrap().arrange_horizontal().unwrap();
}

#[test]
fn test_sync_layout_between_groups() {
    let mut harness = Harness::with_group("left", &[("a", 500.0, 450.0), ("b", 600.0, 450.0)]);
    for id in ["c", "d", "e"] {
        harness.manager.create(id, &panes_lib::window::WindowOptions::sized(400.0, 400.0)).unwrap();
    }
    let mut right = harness.manager.create_group("right").unwrap();
    right.add("c").unwrap().add("d").unwrap().add("e").unwrap();
    drop(right);

    let mut left = harness.manager.group_mut("left").unwrap();
    left.arrange_grid().unwrap();
    left.sync_layout("right").unwrap();
    drop(left);

    // three windows: 2 columns, 2 rows
    assert_eq!(harness.geometry("e"), Rect::new(0.0, 540.0, 960.0, 540.0));
    assert_eq!(harness.manager.group("right").unwrap().layout_name(), Some("grid"));
}

#[test]
fn test_grid_cells_ignore_default_minimum_size() {
    let mut harness = Harness::new();
    let ids = ["a", "b", "c", "d", "e", "f", "g"];
    harness.manager.create_many(&ids, &panes_lib::window::WindowOptions::default()).unwrap();
    assert_eq!(harness.manager.get("g").unwrap().constraints().min_height, Some(400.0));
    let mut group = harness.manager.create_group("g").unwrap();
    for id in ids {
        group.add(id).unwrap();
    }

    let result = group.arrange_grid().unwrap();
    drop(group);

    // seven windows: 3 columns, 3 rows of 640x360
    assert_eq!(harness.geometry("g"), Rect::new(0.0, 720.0, 640.0, 360.0));
    for (id, partial) in &result {
        let committed = harness.geometry(id);
        assert_eq!(PartialRect::full(committed), *partial, "window {id}");
        assert!(committed.y + committed.height <= 1080.0 + 1e-9);
    }
}

#[test]
fn test_master_stack_ignores_default_minimum_size() {
    let mut harness = Harness::new();
    let ids = ["main", "s1", "s2", "s3", "s4"];
    harness.manager.create_many(&ids, &panes_lib::window::WindowOptions::default()).unwrap();
    let mut group = harness.manager.create_group("g").unwrap();
    for id in ids {
        group.add(id).unwrap();
    }
    group.apply_layout("master").unwrap();
    drop(group);

    let s4 = harness.geometry("s4");
    assert!((s4.height - 270.0).abs() < f64::EPSILON);
    assert!((s4.y - 810.0).abs() < f64::EPSILON);
    assert!((s4.width - 1920.0 * 0.3).abs() < 1e-9);
}
