#![allow(clippy::multiple_crate_versions)]

//! Panes - window group orchestration.
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `panes=info`), so
//! stdout stays clean for tables, JSON and demo transition intents.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    init_logging();

    if let Err(err) = panes_lib::cli::run() {
        eprintln!("panes: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("panes=info"));

    // A second subscriber can only come from a test harness; keep the first.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
