//! Group state snapshots, layout export/import and batch persistence.

use std::sync::Arc;
use std::time::Duration;

use panes_lib::WindowGroupStateManager;
use panes_lib::cache::{CacheStore, FileCache, MemoryCache};
use panes_lib::config::StateConfig;
use panes_lib::window::WindowSnapshot;
use tempfile::TempDir;

use crate::common::Harness;

const IDS: [&str; 3] = ["a", "b", "c"];

fn harness() -> Harness {
    Harness::with_group("g", &[("a", 500.0, 450.0), ("b", 700.0, 450.0), ("c", 600.0, 450.0)])
}

fn snapshots(harness: &Harness) -> Vec<WindowSnapshot> {
    IDS.iter().map(|id| harness.manager.get(id).unwrap().snapshot()).collect()
}

#[test]
fn test_save_mutate_restore_is_exact() {
    let mut harness = harness();
    harness.manager.group_mut("g").unwrap().arrange_horizontal().unwrap();
    harness.manager.get_mut("b").unwrap().always_on_top(true).resizable(false);

    let saved = harness.manager.group_mut("g").unwrap().save_state();
    let expected = snapshots(&harness);

    harness.manager.group_mut("g").unwrap().cascade().unwrap();
    harness.manager.get_mut("b").unwrap().always_on_top(false).resizable(true).size(900.0, 500.0);
    assert_ne!(snapshots(&harness), expected);

    harness.manager.group_mut("g").unwrap().restore_state(&saved);
    assert_eq!(snapshots(&harness), expected);
    assert_eq!(harness.manager.group("g").unwrap().layout_name(), Some("horizontal"));
}

#[test]
fn test_export_import_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("g.layout.json");

    let mut harness = harness();
    harness.manager.group_mut("g").unwrap().arrange_grid().unwrap();
    harness.manager.group_mut("g").unwrap().export_layout_to_file(&path).unwrap();
    let expected = harness.geometries(&IDS);

    harness.manager.group_mut("g").unwrap().arrange_vertical().unwrap();
    harness.manager.group_mut("g").unwrap().import_layout_from_file(&path).unwrap();

    assert_eq!(harness.geometries(&IDS), expected);
    assert_eq!(harness.manager.group("g").unwrap().layout_name(), Some("grid"));
}

#[test]
fn test_save_clear_restore_changes_nothing() {
    let cache = Arc::new(MemoryCache::new());
    let states = WindowGroupStateManager::new(cache);
    let mut harness = harness();
    harness.manager.group_mut("g").unwrap().arrange_horizontal().unwrap();

    states.auto_save_all(&harness.manager).unwrap();
    assert!(states.clear_all().unwrap());

    harness.manager.group_mut("g").unwrap().arrange_vertical().unwrap();
    let before = snapshots(&harness);

    assert_eq!(states.auto_restore_all(&mut harness.manager).unwrap(), 0);
    assert_eq!(snapshots(&harness), before);
}

#[test]
fn test_file_backed_state_survives_new_manager() {
    let dir = TempDir::new().unwrap();
    let cache: Arc<dyn CacheStore> = Arc::new(FileCache::new(dir.path()));
    let config = StateConfig { cache_key: "session".to_string(), expire_seconds: Some(60) };

    let mut first = harness();
    first.manager.group_mut("g").unwrap().arrange_horizontal().unwrap();
    WindowGroupStateManager::from_config(&config, cache.clone()).auto_save_all(&first.manager).unwrap();
    let expected = first.geometries(&IDS);

    let mut second = harness();
    let mut stray = second.manager.create_group("unsaved").unwrap();
    stray.add("a").unwrap();
    drop(stray);

    let restored = WindowGroupStateManager::from_config(&config, cache)
        .auto_restore_all(&mut second.manager)
        .unwrap();

    assert_eq!(restored, 1);
    assert_eq!(second.geometries(&IDS), expected);
}

#[test]
fn test_expired_state_is_not_restored() {
    let cache = Arc::new(MemoryCache::new());
    let states = WindowGroupStateManager::new(cache).with_expiry(Duration::ZERO);
    let mut harness = harness();
    harness.manager.group_mut("g").unwrap().arrange_horizontal().unwrap();
    states.auto_save_all(&harness.manager).unwrap();

    harness.manager.group_mut("g").unwrap().cascade().unwrap();
    let before = snapshots(&harness);

    assert_eq!(states.auto_restore_all(&mut harness.manager).unwrap(), 0);
    assert_eq!(snapshots(&harness), before);
}
