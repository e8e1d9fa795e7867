//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "api.base_url", "ui.theme")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "api.base_url", "ui.theme")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{}", value),
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(config.api.base_url.clone()),
        ["api", "api_key"] => Ok(config
            .api
            .api_key
            .clone()
            .unwrap_or_else(|| "<not set>".to_string())),
        ["ui", "theme"] => Ok(config.ui.theme.name().to_string()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => {
            let url = if value.ends_with('/') {
                value.to_string()
            } else {
                format!("{}/", value)
            };
            config.api.base_url = url;
        }
        ["api", "api_key"] => {
            config.api.api_key = (!value.is_empty()).then(|| value.to_string());
        }
        ["ui", "theme"] => {
            config.ui.theme = ThemePreset::from_name(value).ok_or_else(|| {
                let names: Vec<&str> = ThemePreset::all().iter().map(|p| p.name()).collect();
                anyhow::anyhow!("Unknown theme '{}', expected one of: {}", value, names.join(", "))
            })?;
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "api.base_url", "http://localhost:8080/api").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/");

        set_config_value(&mut config, "api.api_key", "secret-key").unwrap();
        assert_eq!(get_config_value(&config, "api.api_key").unwrap(), "secret-key");
        set_config_value(&mut config, "api.api_key", "").unwrap();
        assert!(config.api.api_key.is_none());

        set_config_value(&mut config, "ui.theme", "paper").unwrap();
        assert_eq!(config.ui.theme, ThemePreset::Paper);
        assert_eq!(get_config_value(&config, "ui.theme").unwrap(), "Paper");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut config = Config::default();
        assert!(get_config_value(&config, "game.directory").is_err());
        assert!(set_config_value(&mut config, "ui.theme", "neon").is_err());
        assert!(set_config_value(&mut config, "ui", "x").is_err());
    }
}
