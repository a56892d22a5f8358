//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use cnix_core::CnixConfig;

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
        /// Configuration key (e.g., "input.min_confidence")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
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

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_config_file(config_path);
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(config_path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cnix")
        .join("config.json")
}

/// The file `-c/--config` points at, else the per-user default.
fn resolve_config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map_or_else(default_config_path, PathBuf::from)
}

/// Load the config given on the command line, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CnixConfig> {
    if let Some(path) = config_path {
        return Ok(CnixConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(CnixConfig::from_file(&default_path)?)
    } else {
        Ok(CnixConfig::default())
    }
}

/// Turn a dotted key such as `input.min_confidence` into a JSON pointer.
fn key_pointer(key: &str) -> anyhow::Result<String> {
    if key.split('.').any(str::is_empty) {
        anyhow::bail!("Invalid configuration key: {:?}", key);
    }
    Ok(key
        .split('.')
        .map(|part| format!("/{}", part.replace('~', "~0").replace('/', "~1")))
        .collect())
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    if config_path.is_none() && !default_config_path().exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_config(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_file: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_file.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    CnixConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(config_path: Option<&str>, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_config(config_path)?)?;
    let value = json
        .pointer(&key_pointer(key)?)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

/// Update one key in the config file at `config_file`, creating it if needed.
///
/// The edited document must still deserialize and validate, so unknown keys
/// and out-of-range values are refused before anything is written.
fn set_config(config_file: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = if config_file.exists() {
        CnixConfig::from_file(config_file)?
    } else {
        CnixConfig::default()
    };

    let new_value: serde_json::Value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    let pointer = key_pointer(key)?;
    let (parent, leaf) = match pointer.rsplit_once('/') {
        Some(split) => split,
        None => anyhow::bail!("Invalid configuration key: {:?}", key),
    };

    let mut json = serde_json::to_value(&config)?;
    let section = json
        .pointer_mut(parent)
        .and_then(serde_json::Value::as_object_mut)
        .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    section.insert(leaf.replace("~1", "/").replace("~0", "~"), new_value.clone());

    let updated: CnixConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Cannot set {}: {}", key, e))?;
    updated.validate()?;

    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent)?;
    }
    updated.save(config_file)?;

    println!(
        "{} Set {} = {} in {}",
        style("✓").green(),
        key,
        serde_json::to_string(&new_value)?,
        config_file.display()
    );

    Ok(())
}

fn show_path(config_file: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", config_file.display());

    if config_file.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'cnix config init' to create a configuration file.");
    }

    Ok(())
}
