use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::collection::{DEFAULT_INVALID_PATTERN, TagOptions};
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of tags; absent means unbounded
    #[serde(default)]
    pub max_tags: Option<usize>,
    /// Maximum tag length in characters; absent means unbounded
    #[serde(default)]
    pub max_tag_length: Option<usize>,
    /// Regex a candidate must NOT match; empty string disables the check
    #[serde(default = "default_invalid_pattern")]
    pub invalid_pattern: String,
    /// Keys that terminate the current tag
    #[serde(default = "default_boundary_keys")]
    pub boundary_keys: Vec<String>,
    /// Key that removes the last tag when the caret is at the start
    #[serde(default = "default_delete_key")]
    pub delete_key: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_clear_all")]
    pub clear_all: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_chip_fg")]
    pub chip_fg: String,
    #[serde(default = "default_chip_bg")]
    pub chip_bg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tags: None,
            max_tag_length: None,
            invalid_pattern: default_invalid_pattern(),
            boundary_keys: default_boundary_keys(),
            delete_key: default_delete_key(),
            key_bindings: KeyBindings::default(),
            theme: Theme::default(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            clear_all: default_clear_all(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            chip_fg: default_chip_fg(),
            chip_bg: default_chip_bg(),
        }
    }
}

// Default value functions
fn default_invalid_pattern() -> String {
    DEFAULT_INVALID_PATTERN.to_string()
}

fn default_boundary_keys() -> Vec<String> {
    vec![
        "Tab".to_string(),
        "Enter".to_string(),
        "Space".to_string(),
        "Comma".to_string(),
    ]
}

fn default_delete_key() -> String {
    "Backspace".to_string()
}

fn default_quit() -> String {
    "Esc".to_string()
}

fn default_clear_all() -> String {
    "Ctrl+u".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_chip_fg() -> String {
    "white".to_string()
}

fn default_chip_bg() -> String {
    "blue".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Invalid tag pattern '{pattern}': {source}")]
    PatternError {
        pattern: String,
        source: regex::Error,
    },
    #[error("Invalid key name: {0}")]
    KeyError(String),
}

impl Config {
    /// Load configuration from file, or create default if missing
    /// Uses the provided profile to determine the config path
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, or create default if missing
    pub fn load_from(config_path: &PathBuf) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            // Create default config and save it so users have a file to edit
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from file, using production profile
    /// Use load_with_profile() to specify a different profile
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_profile(utils::Profile::Prod)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &PathBuf) -> Result<(), ConfigError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the file-level fields into the immutable policy snapshot the
    /// tag collection is constructed with
    pub fn tag_options(&self) -> Result<TagOptions, ConfigError> {
        let invalid_pattern = if self.invalid_pattern.is_empty() {
            None
        } else {
            Some(
                regex::Regex::new(&self.invalid_pattern).map_err(|e| ConfigError::PatternError {
                    pattern: self.invalid_pattern.clone(),
                    source: e,
                })?,
            )
        };

        let boundary_keys = self
            .boundary_keys
            .iter()
            .map(|name| utils::parse_key_code(name).map_err(ConfigError::KeyError))
            .collect::<Result<Vec<_>, _>>()?;

        let delete_key = utils::parse_key_code(&self.delete_key).map_err(ConfigError::KeyError)?;

        Ok(TagOptions {
            max_tags: self.max_tags,
            max_tag_length: self.max_tag_length,
            invalid_pattern,
            boundary_keys,
            delete_key,
        })
    }
}
