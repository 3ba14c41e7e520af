//! Configuration template generation.
//!
//! Generates a commented configuration template with every option at its
//! default value.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Panes Configuration File
// =========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.

{
  // ============================================================================
  // Canvas
  // ============================================================================
  // Area used by the grid, split, master and cascade layouts and by
  // full-width/full-height window presets.
  // "canvas": { "width": 1920, "height": 1080 },

  // ============================================================================
  // Window Defaults
  // ============================================================================
  // Applied to every new window before its own options.
  // "window": {
  //   "title": "Panes",
  //   "width": 800,
  //   "height": 600,
  //   "minWidth": 400,
  //   "minHeight": 400,
  //   "maxWidth": null,
  //   "maxHeight": null,
  //   "resizable": true,
  //   "fullscreen": false
  // },

  // ============================================================================
  // Transitions
  // ============================================================================
  // "transitions": {
  //   // Send geometry changes to the host shell as animated transitions
  //   "enabled": true,
  //
  //   // Duration in milliseconds
  //   "duration": 300,
  //
  //   // "linear", "easeIn", "easeOut", "easeInOut", "easeInOutCubic",
  //   // or "easeOutBounce"
  //   "easing": "linear",
  //
  //   // Named overrides, selected with use_preset
  //   "presets": {
  //     "fast": { "duration": 150, "easing": "easeOut" },
  //     "slow": { "duration": 600, "easing": "easeInOut" },
  //     "bounce": { "duration": 500, "easing": "easeOutBounce" }
  //   }
  // },

  // ============================================================================
  // Group State Persistence
  // ============================================================================
  // "state": {
  //   // Cache key holding every saved group
  //   "cacheKey": "native_window_groups",
  //
  //   // Expiry in seconds (null = never expire)
  //   "expireSeconds": 604800
  // },

  // ============================================================================
  // Window Presets
  // ============================================================================
  // Extra presets, or replacements for the built-ins (default, main, dialog,
  // frameless, sidebar, toolbar, notification, panel, small, settings).
  // "windowPresets": {
  //   "inspector": { "width": 320, "height": 640, "alwaysOnTop": true }
  // }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_config_template())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanesConfig;

    #[test]
    fn test_template_parses_to_defaults() {
        let template = generate_config_template();
        let stripped = json_comments::StripComments::new(template.as_bytes());
        let config: PanesConfig = serde_json::from_reader(stripped).unwrap();
        assert_eq!(config, PanesConfig::default());
    }

    #[test]
    fn test_template_contains_all_sections() {
        let template = generate_config_template();
        for section in ["canvas", "window", "transitions", "state", "windowPresets"] {
            assert!(template.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }

    #[test]
    fn test_create_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("panes").join("config.jsonc");
        create_config_file(&path).unwrap();
        assert!(path.exists());
    }
}
