//! Serializable group state.
//!
//! [`StoredGroupState`] is what `save_state` produces and the state manager
//! persists: full geometry and flags per member. [`GroupLayoutExport`] is the
//! lighter cross-process form used by `export_layout`, carrying geometry and
//! member order only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::window::{Rect, WindowId, WindowSnapshot};

/// Snapshot of a group, as written by `save_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGroupState {
    /// Geometry and flags per member window.
    pub windows: BTreeMap<WindowId, WindowSnapshot>,
    /// Layout applied when the snapshot was taken.
    #[serde(default)]
    pub layout: Option<String>,
    /// Unix timestamp (seconds) of the snapshot.
    pub timestamp: u64,
}

/// Layout of a group in a form suitable for another process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLayoutExport {
    /// Name of the exporting group.
    pub group: String,
    #[serde(default)]
    pub layout: Option<String>,
    /// Member ids in group order.
    pub order: Vec<WindowId>,
    /// Geometry per member.
    pub windows: BTreeMap<WindowId, Rect>,
    pub timestamp: u64,
}

impl GroupLayoutExport {
    /// Returns `true` if every id in `members` has exported geometry.
    #[must_use]
    pub fn covers<'a>(&self, members: impl IntoIterator<Item = &'a WindowId>) -> bool {
        members.into_iter().all(|id| self.windows.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::window::WindowFlags;

    #[test]
    fn test_stored_state_json_shape() {
        let state = StoredGroupState {
            windows: BTreeMap::from([(
                "a".to_string(),
                WindowSnapshot { geometry: Rect::new(1.0, 2.0, 3.0, 4.0), flags: WindowFlags::default() },
            )]),
            layout: Some("grid".to_string()),
            timestamp: 42,
        };

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["layout"], "grid");
        assert_eq!(value["timestamp"], 42);
        assert_eq!(value["windows"]["a"]["x"], json!(1.0));
        assert_eq!(value["windows"]["a"]["alwaysOnTop"], json!(false));

        let back: StoredGroupState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_export_covers() {
        let export = GroupLayoutExport {
            group: "g".to_string(),
            layout: None,
            order: vec!["a".to_string()],
            windows: BTreeMap::from([("a".to_string(), Rect::default())]),
            timestamp: 0,
        };
        let a = "a".to_string();
        let b = "b".to_string();
        assert!(export.covers([&a]));
        assert!(!export.covers([&a, &b]));
    }
}
