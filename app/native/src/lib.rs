//! Panes - multi-window orchestration.
//!
//! Panes keeps a registry of windows, arranges them in named groups with
//! pluggable layouts, forwards geometry changes to a host shell as transition
//! intents, and persists group layouts through a cache store.
//!
//! # Components
//!
//! - [`manager::WindowManager`]: window and group registry
//! - [`layout::LayoutPresetEngine`]: named layout algorithms
//! - [`transition::WindowTransition`]: animated geometry changes over IPC
//! - [`state_manager::WindowGroupStateManager`]: batch save/restore of groups
//! - [`events::EventDispatcher`]: prioritized, wildcard-aware pub/sub
//! - [`ipc::IpcChannel`]: message channel to the host shell
//!
//! The library never installs a tracing subscriber; the `panes` binary does.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod ipc;
pub mod layout;
pub mod manager;
pub mod schema;
pub mod state_manager;
pub mod transition;
pub mod window;

pub use error::{PanesError, PanesResult};
pub use manager::WindowManager;
pub use state_manager::WindowGroupStateManager;
pub use window::Window;
