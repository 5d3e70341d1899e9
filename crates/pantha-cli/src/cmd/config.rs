use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use pantha_core::config::{Config, WarnLevel};
use pantha_core::paths;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Write a config file with the defaults, unless one exists
    Init,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(home: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(home, json),
        ConfigSubcommand::Init => init(home),
        ConfigSubcommand::Validate => validate(home, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(home: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(home).context("failed to load config")?;
    if json {
        return print_json(&config);
    }
    let yaml = serde_yaml::to_string(&config)?;
    print!("{yaml}");
    Ok(())
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

fn init(home: &Path) -> anyhow::Result<()> {
    let path = paths::config_path(home);
    if path.exists() {
        println!("Config already exists at {}.", path.display());
        return Ok(());
    }
    Config::default()
        .save(home)
        .context("failed to write config")?;
    println!("Wrote {}.", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(home: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(home).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
