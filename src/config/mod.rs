//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! The API key deserves a note: the DICE API requires a static key on every
//! request. It is resolved from the `DICE_API_KEY` environment variable first
//! so deployments can avoid writing secrets to disk, falling back to the
//! `api_key` field of the config file.

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GigScope";

/// Environment variable consulted before the config file for the API key.
pub const API_KEY_ENV: &str = "DICE_API_KEY";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: None,
            page_size: None,
            theme_mode: ThemeMode::System,
        }
    }
}

/// Resolves the API key: environment first, then config file.
pub fn resolve_api_key(config: &Config) -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .or_else(|| config.api_key.clone().filter(|key| !key.is_empty()))
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Directory used for cached preview downloads.
pub fn cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
