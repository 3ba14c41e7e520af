//! Key/value stores used to persist group layouts between runs.
//!
//! [`CacheStore`] is the seam the state manager talks to. Two stores ship with
//! the crate:
//!
//! - [`MemoryCache`]: process-local, used by tests and the demo command
//! - [`FileCache`]: one JSON file per key under the user cache directory
//!   (`~/.cache/panes/` on Linux, `~/Library/Caches/panes/` on macOS, falling
//!   back to `/tmp/panes/`)
//!
//! Both honor an optional time-to-live. Expired entries read as missing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::APP_NAME;
use crate::error::{PanesError, PanesResult};

/// A get/set/delete key/value store with optional expiry.
pub trait CacheStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> PanesResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> PanesResult<()>;

    /// Removes `key`. Returns whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn delete(&self, key: &str) -> PanesResult<bool>;
}

/// Returns the root cache directory for the application.
#[must_use]
pub fn get_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map_or_else(|| PathBuf::from(format!("/tmp/{APP_NAME}")), |cache| cache.join(APP_NAME))
}

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_timestamp() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_secs())
}

/// A stored value with its absolute expiry time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<u64>,
}

impl Entry {
    fn new(value: Value, ttl: Option<Duration>) -> Self {
        Self { value, expires_at: ttl.map(|ttl| unix_timestamp().saturating_add(ttl.as_secs())) }
    }

    fn is_expired(&self) -> bool { self.expires_at.is_some_and(|at| at <= unix_timestamp()) }
}

// ============================================================================
// MemoryCache
// ============================================================================

/// Process-local cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.lock().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.lock().is_empty() }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> PanesResult<Option<Value>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> PanesResult<()> {
        self.entries.lock().insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }

    fn delete(&self, key: &str) -> PanesResult<bool> { Ok(self.entries.lock().remove(key).is_some()) }
}

// ============================================================================
// FileCache
// ============================================================================

/// Cache storing one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl Default for FileCache {
    fn default() -> Self { Self::new(get_cache_dir()) }
}

impl FileCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    #[must_use]
    pub fn dir(&self) -> &Path { &self.dir }

    /// Path of the file backing `key`.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced so any key maps to a
    /// plain file name.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> PanesResult<Option<Value>> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: Entry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring corrupt cache entry");
                return Ok(None);
            }
        };

        if entry.is_expired() {
            tracing::debug!(key, "cache entry expired");
            std::fs::remove_file(&path)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> PanesResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(&Entry::new(value, ttl))?;
        std::fs::write(&path, content)
            .map_err(|e| PanesError::cache(format!("failed to write {}: {e}", path.display())))?;
        tracing::debug!(key, path = %path.display(), "cache entry written");
        Ok(())
    }

    fn delete(&self, key: &str) -> PanesResult<bool> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
