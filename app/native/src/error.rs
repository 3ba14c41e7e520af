//! Error types for Panes.
//!
//! Every registry, group, layout and transition operation reports failures
//! through [`PanesError`]. All conditions are local and synchronous: nothing
//! in this crate waits on the host shell, so there is no remote-failure
//! category. The enum serializes as `{kind, message}` so an outer request
//! layer can hand it to callers as JSON without further mapping.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Panes operations.
pub type PanesResult<T> = Result<T, PanesError>;

/// Errors that can occur while orchestrating windows and groups.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum PanesError {
    /// No window is registered under the given id.
    #[error("Window '{0}' not found")]
    WindowNotFound(String),

    /// No group is registered under the given name.
    #[error("Window group '{0}' not found")]
    GroupNotFound(String),

    /// A window with the given id already exists.
    #[error("Window '{0}' already exists")]
    DuplicateId(String),

    /// A group with the given name already exists.
    #[error("Window group '{0}' already exists")]
    DuplicateGroup(String),

    /// The requested layout has not been registered.
    #[error("Layout preset '{0}' not found")]
    UnknownLayout(String),

    /// The requested window preset has not been registered.
    #[error("Window preset '{0}' not found")]
    UnknownPreset(String),

    /// Transition options were rejected (negative duration, unknown easing).
    #[error("Invalid transition options: {0}")]
    InvalidTransitionOptions(String),

    /// A layout produced geometry for a window outside the set it was given.
    ///
    /// Raised before anything is committed.
    #[error("Layout '{layout}' returned geometry for unknown window '{window}'")]
    InvalidLayoutResult {
        /// Name of the offending layout.
        layout: String,
        /// The window id the layout should not have produced.
        window: String,
    },

    /// Cache store operation failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// IPC transport failure.
    #[error("IPC error: {0}")]
    Ipc(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// A value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PanesError {
    /// Creates an invalid transition options error.
    #[must_use]
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransitionOptions(message.into())
    }

    /// Creates a cache error with the given message.
    #[must_use]
    pub fn cache(message: impl Into<String>) -> Self { Self::Cache(message.into()) }

    /// Creates an IPC error with the given message.
    #[must_use]
    pub fn ipc(message: impl Into<String>) -> Self { Self::Ipc(message.into()) }

    /// Returns `true` if this error indicates a window or group was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::WindowNotFound(_) | Self::GroupNotFound(_))
    }

    /// Returns `true` if this error indicates a name collision.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateId(_) | Self::DuplicateGroup(_))
    }
}

impl From<std::io::Error> for PanesError {
    fn from(err: std::io::Error) -> Self { Self::Io(err.to_string()) }
}

impl From<serde_json::Error> for PanesError {
    fn from(err: serde_json::Error) -> Self { Self::Serialization(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            PanesError::WindowNotFound("editor".to_string()).to_string(),
            "Window 'editor' not found"
        );
        assert_eq!(
            PanesError::GroupNotFound("coding".to_string()).to_string(),
            "Window group 'coding' not found"
        );
    }

    #[test]
    fn test_invalid_layout_result_display() {
        let err = PanesError::InvalidLayoutResult {
            layout: "custom".to_string(),
            window: "ghost".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("custom"));
        assert!(msg.contains("ghost"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(PanesError::WindowNotFound("a".into()).is_not_found());
        assert!(PanesError::GroupNotFound("a".into()).is_not_found());
        assert!(!PanesError::UnknownLayout("a".into()).is_not_found());

        assert!(PanesError::DuplicateId("a".into()).is_duplicate());
        assert!(PanesError::DuplicateGroup("a".into()).is_duplicate());
        assert!(!PanesError::WindowNotFound("a".into()).is_duplicate());
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: PanesError = io_err.into();
        assert!(matches!(err, PanesError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_serde_error_from_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PanesError = parse_err.into();
        assert!(matches!(err, PanesError::Serialization(_)));
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let err = PanesError::UnknownLayout("spiral".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"UnknownLayout\""));
        assert!(json.contains("spiral"));
    }
}
