use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value as JsonValue};
use tokio::fs;
use tracing::info;

use crate::cli::context::CliContext;
use crate::cli::runtime::read_config_file;
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration, environment overrides included
    Show,

    /// Get one value by dotted key, e.g. `engine.timings.open_menu`
    Get {
        /// Configuration key
        key: String,
    },

    /// Set one value in the configuration file
    Set {
        /// Configuration key
        key: String,

        /// Value, parsed as JSON when possible
        value: String,
    },

    /// Write the default configuration to the configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate the configuration file
    Validate,
}

pub async fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    let path = ctx.config_path().to_path_buf();
    match args.action {
        ConfigAction::Show => {
            println!("Current configuration ({}):", path.display());
            println!("{}", serde_yaml::to_string(ctx.config())?);
        }
        ConfigAction::Get { key } => {
            let json = serde_json::to_value(ctx.config())?;
            let segments = split_key(&key)?;
            match get_json_value(&json, &segments) {
                Some(value) => print!("{}", serde_yaml::to_string(value)?),
                None => bail!("{} not found in configuration", key),
            }
        }
        ConfigAction::Set { key, value } => {
            let config = load_config_file(&path).await?;
            let mut json = serde_json::to_value(&config)?;
            let segments = split_key(&key)?;
            set_json_value(&mut json, &segments, parse_cli_value(&value))?;
            let config: Config = serde_json::from_value(json)
                .with_context(|| format!("{} cannot hold {}", key, value))?;
            config.validate().map_err(|err| anyhow!(err))?;
            save_config_file(&path, &config).await?;
            info!("Updated configuration key {}", key);
            println!("Saved configuration to {}", path.display());
        }
        ConfigAction::Init { force } => {
            if !force && fs::try_exists(&path).await? {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            save_config_file(&path, &Config::default()).await?;
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigAction::Validate => {
            if fs::try_exists(&path).await? {
                let config = read_config_file(&path).await?;
                config
                    .validate()
                    .map_err(|err| anyhow!("{}: {}", path.display(), err))?;
                println!("Configuration file {} is valid", path.display());
            } else {
                println!(
                    "No configuration file at {}; defaults are valid",
                    path.display()
                );
            }
        }
    }

    Ok(())
}

async fn load_config_file(path: &Path) -> Result<Config> {
    if fs::try_exists(path).await? {
        read_config_file(path).await
    } else {
        Ok(Config::default())
    }
}

async fn save_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let serialized = serde_yaml::to_string(config)?;
    fs::write(path, serialized)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn parse_cli_value(raw: &str) -> JsonValue {
    serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

fn split_key(key: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = key
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        bail!("configuration key cannot be empty");
    }
    Ok(segments)
}

fn set_json_value(target: &mut JsonValue, path: &[&str], value: JsonValue) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        bail!("configuration key cannot be empty");
    };
    let mut current = target;
    let mut owner = "configuration";
    for segment in parents {
        current = as_object(current, owner)?
            .entry((*segment).to_string())
            .or_insert(JsonValue::Null);
        owner = *segment;
    }
    as_object(current, owner)?.insert((*last).to_string(), value);
    Ok(())
}

/// `value` as a section, creating it when null. `owner` names the key holding it.
fn as_object<'a>(value: &'a mut JsonValue, owner: &str) -> Result<&'a mut Map<String, JsonValue>> {
    if value.is_null() {
        *value = JsonValue::Object(Map::new());
    }
    value
        .as_object_mut()
        .ok_or_else(|| anyhow!("{} is not a section; cannot assign a nested key", owner))
}

fn get_json_value<'a>(value: &'a JsonValue, path: &[&str]) -> Option<&'a JsonValue> {
    path.iter()
        .try_fold(value, |current, segment| current.as_object()?.get(*segment))
}
