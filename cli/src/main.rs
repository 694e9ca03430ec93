// nativestore-cli — Desktop host for the storage bridge
//
// Plays the part of the mobile app on desktop: registers the storage module
// at startup, hands it to the storage screen, and persists to the platform
// data directory.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use nativestore_core::shell::{PLACEHOLDER, STORAGE_KEY};
use nativestore_core::{ModuleRegistry, NativeLocalStorage, StorageScreen, MODULE_NAME};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(name = "nativestore")]
#[command(about = "NativeStore — persistent key/value storage bridge", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a stored value
    Get {
        #[arg(short, long, default_value = STORAGE_KEY)]
        key: String,
    },
    /// Store a value
    Set {
        value: String,
        #[arg(short, long, default_value = STORAGE_KEY)]
        key: String,
    },
    /// Show the storage screen
    Show,
    /// Type into the storage screen and press Save
    Save { text: String },
    /// Show storage status
    Status,
    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Set { key: String, value: String },
    Get { key: String },
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;
    let _guard = init_logging(&config)?;

    match cli.command {
        Commands::Get { key } => cmd_get(&config, key),
        Commands::Set { value, key } => cmd_set(&config, value, key),
        Commands::Show => cmd_show(&config),
        Commands::Save { text } => cmd_save(&config, text),
        Commands::Status => cmd_status(&config),
        Commands::Config { action } => cmd_config(config, action),
    }
}

fn init_logging(config: &config::Config) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if config.log_to_file {
        let log_dir = config::Config::data_dir()?.join("logs");
        let appender = tracing_appender::rolling::daily(log_dir, "nativestore.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}

/// Register the storage module the way a host app does at launch.
fn bootstrap(config: &config::Config) -> Result<ModuleRegistry> {
    let storage_dir = config.storage_dir()?;
    let storage = NativeLocalStorage::open_with_config(&storage_dir, config.bridge.clone())
        .with_context(|| format!("Failed to open storage at {}", storage_dir.display()))?;

    tracing::info!("Storage module ready at {}", storage_dir.display());
    Ok(ModuleRegistry::with_module(storage))
}

fn storage(config: &config::Config) -> Result<Arc<NativeLocalStorage>> {
    let registry = bootstrap(config)?;
    Ok(registry.get_enforcing(MODULE_NAME)?)
}

fn cmd_get(config: &config::Config, key: String) -> Result<()> {
    let value = storage(config)?.get_string(key.clone())?;

    if value.is_empty() {
        println!("{} = {}", key.bright_cyan(), "(empty)".dimmed());
    } else {
        println!("{} = {}", key.bright_cyan(), value);
    }
    Ok(())
}

fn cmd_set(config: &config::Config, value: String, key: String) -> Result<()> {
    storage(config)?.set_string(value.clone(), key.clone())?;
    println!("{} Stored {} = {}", "✓".green(), key.bright_cyan(), value);
    Ok(())
}

fn cmd_show(config: &config::Config) -> Result<()> {
    let registry = bootstrap(config)?;
    let mut screen = StorageScreen::from_registry(&registry)?;
    screen.mount().context("Failed to load stored value")?;

    print_screen(&screen);
    Ok(())
}

fn cmd_save(config: &config::Config, text: String) -> Result<()> {
    let registry = bootstrap(config)?;
    let mut screen = StorageScreen::from_registry(&registry)?;
    screen.mount().context("Failed to load stored value")?;

    screen.on_change_text(text);
    screen.save().context("Failed to save value")?;

    print_screen(&screen);
    println!("{} Saved", "✓".green());
    Ok(())
}

fn print_screen(screen: &StorageScreen) {
    println!("{}", screen.display_text().bold());
    println!(
        "  [{}]",
        screen.editing_value().unwrap_or(PLACEHOLDER).dimmed()
    );
    println!("  [ {} ]", "Save".bright_green());
}

fn cmd_status(config: &config::Config) -> Result<()> {
    let storage_dir = config.storage_dir()?;

    println!("{}", "Storage Status".bold());
    println!("  Module:      {}", MODULE_NAME.bright_cyan());
    println!("  Location:    {}", storage_dir.display());
    println!(
        "  Preferences: {}",
        config.bridge.preferences_name.bright_yellow()
    );
    println!("  On failure:  {}", config.bridge.failure_policy);

    let prefs_path = storage_dir.join(&config.bridge.preferences_name);
    if prefs_path.exists() {
        println!("  State:       {}", "initialized".green());
    } else {
        println!("  State:       {}", "no values stored yet".dimmed());
    }
    Ok(())
}

fn cmd_config(mut config: config::Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{} Set {} = {}", "✓".green(), key.bright_cyan(), value);
        }

        ConfigAction::Get { key } => {
            if let Some(value) = config.get(&key) {
                println!("{} = {}", key.bright_cyan(), value);
            } else if key == "storage_path" {
                println!("{} = {}", key.bright_cyan(), "(auto)".dimmed());
            } else {
                anyhow::bail!("Unknown config key: {}", key);
            }
        }

        ConfigAction::List => {
            println!("{}", "Configuration".bold());
            println!();

            for (key, value) in config.list() {
                println!("  {:<20} {}", key.bright_cyan(), value);
            }
        }
    }

    Ok(())
}
