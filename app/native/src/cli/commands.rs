//! CLI command definitions using Clap.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;
use serde_json::json;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, PanesConfig};
use crate::error::{PanesError, PanesResult};
use crate::events::EventDispatcher;
use crate::ipc::{IpcChannel, JsonLinesTransport};
use crate::manager::WindowManager;
use crate::schema;
use crate::window::{Rect, TitleBarStyle, WindowOptions};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Group name used by commands that arrange synthetic windows.
const CLI_GROUP: &str = "cli";

/// Panes CLI - inspect layouts, presets and the host-shell protocol.
#[derive(Parser, Debug)]
#[command(name = "panes")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Compute a layout for a number of synthetic windows.
    ///
    /// Windows are created with the configured defaults, grouped, and
    /// arranged with the named layout on the configured canvas.
    #[command(after_long_help = r#"Examples:
  panes layout grid --count 5                  # 5 windows on the configured canvas
  panes layout split -n 2 --width 2560         # Split a wider canvas
  panes layout horizontal -n 3 --json          # Machine-readable output"#)]
    Layout {
        /// Layout name (see `panes layouts`).
        #[arg(value_name = "NAME")]
        name: String,

        /// Number of windows to arrange.
        #[arg(long, short = 'n', default_value_t = 3)]
        count: usize,

        /// Canvas width override.
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height override.
        #[arg(long)]
        height: Option<f64>,

        /// Print JSON instead of a table.
        #[arg(long, short)]
        json: bool,
    },

    /// List registered layout names.
    Layouts,

    /// List window presets, resolved against the canvas.
    Presets {
        /// Print JSON instead of a table.
        #[arg(long, short)]
        json: bool,
    },

    /// Print transition intents for a horizontal arrangement.
    ///
    /// Creates a group of windows and arranges it with transitions enabled.
    /// Every intent is written to stdout as one JSON line, exactly as a host
    /// shell would receive it.
    Demo {
        /// Number of windows in the demo group.
        #[arg(long, short = 'n', default_value_t = 3)]
        count: usize,
    },

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support JSON
    /// Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(panes completions --shell zsh)"
    ///   panes completions --shell fish > ~/.config/fish/completions/panes.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a configuration file with every option documented.
    #[command(after_long_help = r#"Examples:
  panes config init                           # Create config at default location
  panes config init --force                   # Overwrite existing config
  panes config init --path ~/panes.jsonc      # Create at custom path
  panes config init --stdout                  # Print template to stdout"#)]
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template to stdout instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the configuration search paths and which one is in use.
    Path,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command fails.
    pub fn execute(&self) -> PanesResult<()> {
        match &self.command {
            Commands::Layout { name, count, width, height, json } => {
                let mut config = self.load_config()?;
                config.canvas.width = width.unwrap_or(config.canvas.width);
                config.canvas.height = height.unwrap_or(config.canvas.height);
                execute_layout(&config, name, *count, *json)
            }
            Commands::Layouts => {
                let manager = manager(&self.load_config()?, IpcChannel::recording().0)?;
                for name in manager.engine().names() {
                    println!("{name}");
                }
                Ok(())
            }
            Commands::Presets { json } => execute_presets(&self.load_config()?, *json),
            Commands::Demo { count } => execute_demo(&self.load_config()?, *count),
            Commands::Config(cmd) => execute_config(cmd),
            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn load_config(&self) -> PanesResult<PanesConfig> {
        if let Some(path) = &self.config
            && !path.exists()
        {
            return Err(PanesError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let (config, _) = config::load_or_default(self.config.as_deref())?;
        Ok(config)
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "panes", &mut io::stdout());
    }
}

fn manager(config: &PanesConfig, ipc: IpcChannel) -> PanesResult<WindowManager> {
    WindowManager::with_config(config, Arc::new(ipc), Arc::new(EventDispatcher::new()))
}

/// Creates `count` windows named `window-1..` and groups them.
fn populate(manager: &mut WindowManager, count: usize) -> PanesResult<()> {
    let ids: Vec<String> = (1..=count).map(|i| format!("window-{i}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    manager.create_many(&refs, &WindowOptions::default())?;

    let mut group = manager.create_group(CLI_GROUP)?;
    for id in &refs {
        group.add(id)?;
    }
    Ok(())
}

// ============================================================================
// layout
// ============================================================================

fn execute_layout(config: &PanesConfig, name: &str, count: usize, json: bool) -> PanesResult<()> {
    #[derive(Tabled)]
    struct WindowRow {
        #[tabled(rename = "Window")]
        id: String,
        #[tabled(rename = "X")]
        x: f64,
        #[tabled(rename = "Y")]
        y: f64,
        #[tabled(rename = "Width")]
        width: f64,
        #[tabled(rename = "Height")]
        height: f64,
    }

    let mut manager = manager(config, IpcChannel::recording().0)?;
    populate(&mut manager, count)?;
    manager.group_mut(CLI_GROUP)?.apply_layout(name)?;

    let group = manager.group(CLI_GROUP)?;
    let windows = group
        .ids()
        .iter()
        .map(|id| manager.get(id).map(|window| (id.clone(), window.geometry())))
        .collect::<PanesResult<Vec<(String, Rect)>>>()?;

    if json {
        let entries: Vec<_> = windows
            .iter()
            .map(|(id, rect)| json!({ "id": id, "x": rect.x, "y": rect.y, "width": rect.width, "height": rect.height }))
            .collect();
        output::print_highlighted_json(&json!({
            "layout": name,
            "canvas": manager.canvas(),
            "windows": entries,
        }));
        return Ok(());
    }

    let rows: Vec<WindowRow> = windows
        .into_iter()
        .map(|(id, rect)| WindowRow { id, x: rect.x, y: rect.y, width: rect.width, height: rect.height })
        .collect();

    let canvas = manager.canvas();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..5)).with(Alignment::right()))
        .to_string();

    println!("{}", format!("{name} ({count} windows on {}x{})", canvas.width, canvas.height).bold());
    println!("{table}");
    Ok(())
}

// ============================================================================
// presets
// ============================================================================

fn execute_presets(config: &PanesConfig, json: bool) -> PanesResult<()> {
    #[derive(Tabled)]
    struct PresetRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Width")]
        width: String,
        #[tabled(rename = "Height")]
        height: String,
        #[tabled(rename = "Resizable")]
        resizable: String,
        #[tabled(rename = "On Top")]
        always_on_top: String,
        #[tabled(rename = "Title Bar")]
        title_bar: String,
    }

    let manager = manager(config, IpcChannel::recording().0)?;
    let canvas = manager.canvas();
    let presets = manager
        .presets()
        .names()
        .into_iter()
        .map(|name| manager.presets().resolve(name, &canvas).map(|options| (name.to_string(), options)))
        .collect::<PanesResult<Vec<_>>>()?;

    if json {
        let map: serde_json::Map<String, serde_json::Value> = presets
            .into_iter()
            .map(|(name, options)| serde_json::to_value(options).map(|value| (name, value)))
            .collect::<Result<_, _>>()?;
        output::print_highlighted_json(&serde_json::Value::Object(map));
        return Ok(());
    }

    let rows: Vec<PresetRow> = presets
        .into_iter()
        .map(|(name, options)| PresetRow {
            name,
            title: options.title.as_deref().map_or_else(|| "-".to_string(), |t| output::truncate(t, 20)),
            width: output::format_number(options.width),
            height: output::format_number(options.height),
            resizable: output::format_flag(options.resizable),
            always_on_top: output::format_flag(options.always_on_top),
            title_bar: match options.title_bar_style {
                Some(TitleBarStyle::Visible) => "visible".to_string(),
                Some(TitleBarStyle::Hidden) => "hidden".to_string(),
                Some(TitleBarStyle::Overlay) => "overlay".to_string(),
                None => "-".to_string(),
            },
        })
        .collect();

    let count = rows.len();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .with(Modify::new(Columns::new(4..6)).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Window presets ({count})").bold());
    println!("{table}");
    Ok(())
}

// ============================================================================
// demo
// ============================================================================

fn execute_demo(config: &PanesConfig, count: usize) -> PanesResult<()> {
    let mut config = config.clone();
    config.transitions.enabled = true;

    let ipc = IpcChannel::new(Arc::new(JsonLinesTransport::stdout()));
    let mut manager = manager(&config, ipc)?;
    populate(&mut manager, count)?;
    manager.group_mut(CLI_GROUP)?.arrange_horizontal_with_transition()?;

    tracing::info!(windows = count, "demo transitions written");
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn execute_config(cmd: &ConfigCommands) -> PanesResult<()> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => {
            let path = path.clone().unwrap_or_else(|| {
                config::config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
            });
            init_config(&path, *force)
        }
        ConfigCommands::Path => {
            show_config_paths();
            Ok(())
        }
    }
}

fn init_config(path: &Path, force: bool) -> PanesResult<()> {
    if path.exists() && !force {
        return Err(PanesError::Config(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        )));
    }

    create_config_file(path).map_err(|e| {
        PanesError::Config(format!("Failed to create config file {}: {e}", path.display()))
    })?;

    println!("Configuration file created at: {}", path.display());
    println!("\nAll options are commented out by default.");
    Ok(())
}

fn show_config_paths() {
    println!("Configuration file search paths (in priority order):\n");

    let mut found = false;
    for (i, path) in config::config_paths().iter().enumerate() {
        let marker = match (path.exists(), found) {
            (true, false) => {
                found = true;
                " (active)"
            }
            (true, true) => " (exists)",
            _ => "",
        };
        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if !found {
        println!("\nNo configuration file found. Defaults are in use.");
        println!("Run 'panes config init' to create one.");
    }
}
