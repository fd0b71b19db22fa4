//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default parameter values (used when CLI flags are not given).
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// `OpenAI` API key.
    pub openai: Option<String>,
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    /// Default model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { model: default_model(), api_url: default_api_url() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the `OpenAI` API key, preferring environment variable.
    #[must_use]
    pub fn openai_key(&self) -> Option<String> {
        std::env::var("OPENAI_API_KEY").ok().or_else(|| self.keys.openai.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `STOCKPROMPT_CONFIG` environment variable
/// 3. `~/.config/stockprompt/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("STOCKPROMPT_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/stockprompt/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/stockprompt/config.toml")
    } else {
        PathBuf::from("stockprompt.toml")
    }
}
