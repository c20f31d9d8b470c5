//! TOML-based application configuration.
//!
//! Stores scoring weights, the streak qualification threshold, and the
//! recorder flush interval.
//!
//! Configuration is stored at `~/.config/momentum/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::stats::{ScoreWeights, StreakPolicy};

/// Scoring-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    #[serde(default = "default_weight")]
    pub schedule_weight: f64,
    #[serde(default = "default_weight")]
    pub tasks_weight: f64,
    #[serde(default = "default_weight")]
    pub focus_weight: f64,
    /// Focus seconds at which the focus component saturates.
    #[serde(default = "default_focus_target_secs")]
    pub focus_target_secs: u64,
    /// A day extends the streak only when its score is strictly above this.
    #[serde(default)]
    pub streak_min_score: f64,
}

/// Activity recorder configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecorderConfig {
    /// Minimum seconds between periodic best-effort flushes.
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/momentum/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
}

// Default functions
fn default_weight() -> f64 {
    1.0 / 3.0
}
fn default_focus_target_secs() -> u64 {
    crate::stats::FOCUS_TARGET_SECS
}
fn default_flush_interval_secs() -> u64 {
    30
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            schedule_weight: default_weight(),
            tasks_weight: default_weight(),
            focus_weight: default_weight(),
            focus_target_secs: default_focus_target_secs(),
            streak_min_score: 0.0,
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            flush_interval_secs: default_flush_interval_secs(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        let dir = data_dir().map_err(|e| crate::error::CoreError::Custom(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
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

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
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
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the key's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;

        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (parents.split('.').collect::<Vec<_>>(), leaf),
            None => (Vec::new(), key),
        };
        let mut current = &mut json;
        for part in parents {
            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }
        let obj = current
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        // Parse the new value as the same JSON type the key has now.
        let parsed = match existing {
            serde_json::Value::Bool(_) => {
                let b = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as bool"),
                })?;
                serde_json::Value::Bool(b)
            }
            serde_json::Value::Number(n) if n.is_u64() => {
                let v = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as integer"),
                })?;
                serde_json::Value::Number(v.into())
            }
            serde_json::Value::Number(_) => {
                let v = value.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as number"),
                })?;
                serde_json::Number::from_f64(v)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as number"),
                    })?
            }
            _ => serde_json::Value::String(value.to_string()),
        };
        obj.insert(leaf.to_string(), parsed);

        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// The configured score weights, unvalidated.
    pub fn score_weights(&self) -> ScoreWeights {
        ScoreWeights {
            schedule: self.scoring.schedule_weight,
            tasks: self.scoring.tasks_weight,
            focus: self.scoring.focus_weight,
        }
    }

    /// The configured streak policy.
    pub fn streak_policy(&self) -> StreakPolicy {
        StreakPolicy {
            min_score: self.scoring.streak_min_score,
        }
    }
}
