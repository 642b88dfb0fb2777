//! TOML-based application configuration.
//!
//! Holds the ambient settings that are not user data:
//! - Interstitial page location for blocking redirects
//! - Grading service endpoint and model
//! - Leaderboard service endpoint and table
//!
//! Configuration is stored at `~/.config/koala/config.toml`. User data
//! (block list, flashcards, counters) lives in the [`super::Store`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Interception settings.
///
/// Only the interstitial location lives here; the enabled flag is user
/// state and kept in the store so every surface sees toggles
/// immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptSettings {
    /// Page blocked navigations are redirected to. The original URL is
    /// appended as an `original` query parameter.
    #[serde(default = "default_intercept_page")]
    pub page: String,
}

/// Grading/generation service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    #[serde(default = "default_grading_base_url")]
    pub base_url: String,
    #[serde(default = "default_grading_model")]
    pub model: String,
}

/// Leaderboard service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Project base URL; endpoints are `{base_url}/rest/v1/{table}`.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_leaderboard_table")]
    pub table: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/koala/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub intercept: InterceptSettings,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

fn default_intercept_page() -> String {
    "koala://study".into()
}
fn default_grading_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_grading_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_leaderboard_table() -> String {
    "leaderboard".into()
}

impl Default for InterceptSettings {
    fn default() -> Self {
        Self {
            page: default_intercept_page(),
        }
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            base_url: default_grading_base_url(),
            model: default_grading_model(),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            table: default_leaderboard_table(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intercept: InterceptSettings::default(),
            grading: GradingConfig::default(),
            leaderboard: LeaderboardConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written
    /// to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the
    /// key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
