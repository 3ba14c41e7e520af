//! Batch persistence of every group's layout.
//!
//! [`WindowGroupStateManager`] snapshots all groups of a [`WindowManager`]
//! into a single cache entry and restores them later. Storage is injected as a
//! [`CacheStore`]; this module owns none.
//!
//! # Cache Format
//!
//! One key (default `native_window_groups`) holds a JSON object mapping group
//! names to [`StoredGroupState`] values:
//!
//! ```json
//! {
//!   "editor": {
//!     "windows": { "main": { "x": 0.0, "y": 0.0, "width": 800.0, ... } },
//!     "layout": "horizontal",
//!     "timestamp": 1700000000
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::StateConfig;
use crate::constants::{DEFAULT_STATE_CACHE_KEY, DEFAULT_STATE_EXPIRY_SECS};
use crate::error::{PanesError, PanesResult};
use crate::manager::{StoredGroupState, WindowManager};

/// Saves, restores and clears the layout of every group at once.
pub struct WindowGroupStateManager {
    cache: Arc<dyn CacheStore>,
    cache_key: String,
    expiry: Option<Duration>,
}

impl std::fmt::Debug for WindowGroupStateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowGroupStateManager")
            .field("cache_key", &self.cache_key)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl WindowGroupStateManager {
    /// Creates a state manager with the default key and a 7-day expiry.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self {
            cache,
            cache_key: DEFAULT_STATE_CACHE_KEY.to_string(),
            expiry: Some(Duration::from_secs(DEFAULT_STATE_EXPIRY_SECS)),
        }
    }

    /// Creates a state manager from the `state` configuration section.
    #[must_use]
    pub fn from_config(config: &StateConfig, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            cache,
            cache_key: config.cache_key.clone(),
            expiry: config.expire_seconds.map(Duration::from_secs),
        }
    }

    #[must_use]
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    #[must_use]
    pub const fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Saved layouts never expire.
    #[must_use]
    pub const fn without_expiry(mut self) -> Self {
        self.expiry = None;
        self
    }

    #[must_use]
    pub fn cache_key(&self) -> &str { &self.cache_key }

    #[must_use]
    pub const fn expiry(&self) -> Option<Duration> { self.expiry }

    /// Snapshots every group and writes the aggregate under the cache key.
    ///
    /// Returns the number of groups saved.
    ///
    /// # Errors
    ///
    /// Returns [`PanesError::Serialization`] or the cache store's error.
    pub fn auto_save_all(&self, manager: &WindowManager) -> PanesResult<usize> {
        let states = manager.save_all_states();
        let count = states.len();
        self.cache.set(&self.cache_key, serde_json::to_value(&states)?, self.expiry)?;
        tracing::debug!(key = %self.cache_key, groups = count, "group states saved");
        Ok(count)
    }

    /// Restores every cached group that also exists in `manager`.
    ///
    /// A missing cache entry means there is nothing to restore. Cached groups
    /// with no live counterpart are skipped. Returns the number of groups
    /// restored.
    ///
    /// # Errors
    ///
    /// Returns the cache store's error, or [`PanesError::Cache`] if the entry
    /// is not a map of group states.
    pub fn auto_restore_all(&self, manager: &mut WindowManager) -> PanesResult<usize> {
        let Some(value) = self.cache.get(&self.cache_key)? else {
            tracing::debug!(key = %self.cache_key, "no saved group states");
            return Ok(0);
        };

        let states: BTreeMap<String, StoredGroupState> = serde_json::from_value(value)
            .map_err(|e| PanesError::cache(format!("invalid entry '{}': {e}", self.cache_key)))?;

        let mut restored = 0;
        for (name, state) in &states {
            if !manager.has_group(name) {
                tracing::warn!(group = %name, "skipping saved state of unknown group");
                continue;
            }
            manager.group_mut(name)?.restore_state(state);
            restored += 1;
        }

        tracing::debug!(key = %self.cache_key, groups = restored, "group states restored");
        Ok(restored)
    }

    /// Deletes the cached states. Returns whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns the cache store's error.
    pub fn clear_all(&self) -> PanesResult<bool> {
        let existed = self.cache.delete(&self.cache_key)?;
        tracing::debug!(key = %self.cache_key, existed, "group states cleared");
        Ok(existed)
    }
}
