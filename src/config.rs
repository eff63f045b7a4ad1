use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub render: RenderConfig,
    pub favorites: FavoritesConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding `projects/`, `blog/` and `tutorials/`.
    pub root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Message shown in place of an empty document.
    pub placeholder: String,
    pub external_link_icon: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: "Aucun contenu disponible.".to_string(),
            external_link_icon: true,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FavoritesConfig {
    pub path: PathBuf,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("favorites.json"),
        }
    }
}

impl Config {
    /// The configuration bundled with the binary.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("bundled default_config.toml is invalid, using defaults: {e}");
            Self::default()
        })
    }

    /// Load config from a TOML file. Returns `None` if the file doesn't exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    /// Load config from `config_path`, falling back to the bundled default.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_else(Self::compiled_default))
    }
}
