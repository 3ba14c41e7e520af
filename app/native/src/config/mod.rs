//! Configuration loading for Panes.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! There is no global configuration instance: callers load a [`PanesConfig`]
//! and hand it to the constructors that need it.

pub mod template;
mod types;

use std::fs;
use std::path::{Path, PathBuf};

pub use types::{CanvasConfig, PanesConfig, StateConfig, TransitionsConfig, WindowDefaults};

use crate::constants::APP_NAME;

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    Io(std::io::Error),
    /// The configuration file contains invalid JSON.
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/{APP_NAME}/config.jsonc \
                or ~/.{APP_NAME}.jsonc"
            ),
            Self::Io(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::Parse(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::Io(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::Parse(err) }
}

impl From<ConfigError> for crate::error::PanesError {
    fn from(err: ConfigError) -> Self { Self::Config(err.to_string()) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/panes/config.jsonc` or `config.json`, when set
/// 2. `~/.config/panes/config.jsonc` or `config.json`
/// 3. The platform config directory (`~/Library/Application Support/panes/` on macOS)
/// 4. `~/.panes.jsonc` or `~/.panes.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    fn push_dir(dir: PathBuf, paths: &mut Vec<PathBuf>) {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        push_dir(PathBuf::from(xdg_config).join(APP_NAME), &mut paths);
    }
    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_NAME), &mut paths);
    }
    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_NAME), &mut paths);
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{APP_NAME}.jsonc")));
        paths.push(home.join(format!(".{APP_NAME}.json")));
    }

    paths
}

/// Loads and parses one configuration file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::Io` if it cannot be read and `ConfigError::Parse` if it is
/// not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<PanesConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the configuration from the first existing file in [`config_paths`].
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// error of the first file found.
pub fn load_config() -> Result<(PanesConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let config = load_config_from_path(&path)?;
            return Ok((config, path));
        }
    }
    Err(ConfigError::NotFound)
}

/// Loads the configuration from `custom` if given, otherwise from the search
/// paths, falling back to defaults when no file exists.
///
/// # Errors
///
/// Read and parse failures are returned; a missing default file is not an error.
/// A missing `custom` file is.
pub fn load_or_default(custom: Option<&Path>) -> Result<(PanesConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = custom {
        let config = load_config_from_path(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        return Ok((config, Some(path.to_path_buf())));
    }

    match load_config() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            Ok((config, Some(path)))
        }
        Err(ConfigError::NotFound) => {
            tracing::debug!("no configuration file found, using defaults");
            Ok((PanesConfig::default(), None))
        }
        Err(err) => Err(err),
    }
}
