//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use invex_core::InvexConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "ocr.languages")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, config_path),
        ConfigCommand::Get { key } => get_config(&key, config_path),
        ConfigCommand::Set { key, value } => set_config(&key, &value, config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

/// `<config dir>/invex/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invex")
        .join("config.json")
}

/// The file a run reads its settings from, if any.
///
/// An explicit `--config` path always wins; otherwise the user config file
/// is used when it exists.
fn config_source(explicit: Option<&str>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_config_path()).filter(|p| p.exists()),
    }
}

/// Resolve the configuration for a run, falling back to built-in defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<InvexConfig> {
    match config_source(explicit) {
        Some(path) => read_config(&path),
        None => Ok(InvexConfig::default()),
    }
}

fn read_config(path: &Path) -> anyhow::Result<InvexConfig> {
    debug!("Loading config from {}", path.display());
    InvexConfig::from_file(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

/// File that `init` and `set` write to.
fn writable_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

fn show_config(explicit: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(explicit)?;

    // Notes go to stderr so stdout stays valid JSON
    match config_source(explicit) {
        Some(path) => eprintln!("{} Settings from {}", style("ℹ").blue(), path.display()),
        None => eprintln!("{} Built-in defaults (no config file)", style("ℹ").blue()),
    }
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, explicit: Option<&str>) -> anyhow::Result<()> {
    let target = args.output.unwrap_or_else(|| writable_path(explicit));

    if target.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it with the defaults",
            target.display()
        );
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    InvexConfig::default().save(&target)?;

    println!(
        "{} Wrote default settings to {}",
        style("✓").green(),
        target.display()
    );

    Ok(())
}

fn get_config(key: &str, explicit: Option<&str>) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_config(explicit)?)?;

    let mut current = &json;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    println!("{}", serde_json::to_string_pretty(current)?);

    Ok(())
}

fn set_config(key: &str, value: &str, explicit: Option<&str>) -> anyhow::Result<()> {
    let target = writable_path(explicit);
    let config = if target.exists() {
        read_config(&target)?
    } else {
        InvexConfig::default()
    };

    // Bare words that are not valid JSON are taken as strings
    let parsed_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        anyhow::bail!("Empty configuration key");
    };

    let mut current = &mut json;
    for part in parents {
        current = current
            .get_mut(*part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    }

    match current.as_object_mut() {
        Some(obj) if obj.contains_key(*last) => {
            obj.insert((*last).to_string(), parsed_value.clone());
        }
        Some(_) => anyhow::bail!("Configuration key not found: {}", key),
        None => anyhow::bail!("{} is a value, not a section", parents.join(".")),
    }

    let config: InvexConfig = serde_json::from_value(json)
        .with_context(|| format!("Invalid value for {}", key))?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(&target)?;

    println!(
        "{} {} = {} ({})",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?,
        target.display()
    );

    Ok(())
}

fn show_path(explicit: Option<&str>) -> anyhow::Result<()> {
    let user_path = default_config_path();
    let state = if user_path.exists() {
        style("present").green()
    } else {
        style("missing").yellow()
    };
    println!("User config: {} ({})", user_path.display(), state);

    match config_source(explicit) {
        Some(path) => println!("In effect:   {}", path.display()),
        None => println!("In effect:   built-in defaults (create one with 'invex config init')"),
    }

    Ok(())
}
