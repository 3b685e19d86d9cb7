use crate::error::{AttrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "attrib.json";
const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Configuration for attrib, stored in attrib.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttribConfig {
    /// Merge into an existing attribute with the same id instead of replacing it
    #[serde(default = "default_true")]
    pub allow_update: bool,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for AttribConfig {
    fn default() -> Self {
        Self {
            allow_update: true,
            pretty: true,
            log_level: default_log_level(),
        }
    }
}

impl AttribConfig {
    /// Load config from the given file, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(AttrError::Io)?;
        let config: AttribConfig =
            serde_json::from_str(&content).map_err(AttrError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given file, creating its directory if needed
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();

        if let Some(dir) = config_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(AttrError::Io)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(AttrError::Serialization)?;
        fs::write(config_path, content).map_err(AttrError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "allow-update" => Some(self.allow_update.to_string()),
            "pretty" => Some(self.pretty.to_string()),
            "log-level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "allow-update" => self.allow_update = parse_bool(key, value)?,
            "pretty" => self.pretty = parse_bool(key, value)?,
            "log-level" => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(AttrError::Config(format!(
                        "Invalid log-level '{}': expected one of {}",
                        value,
                        LOG_LEVELS.join(", ")
                    )));
                }
                self.log_level = level;
            }
            _ => return Err(AttrError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// All keys with their current values, in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        ["allow-update", "pretty", "log-level"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|v| (key, v)))
            .collect()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(AttrError::Config(format!(
            "Invalid value for {}: '{}' (expected true or false)",
            key, value
        ))),
    }
}
