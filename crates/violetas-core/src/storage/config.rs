//! TOML-based application configuration.
//!
//! Stores:
//! - Clock thresholds and tick interval
//! - Breakout group settings (minimum size, optional seed)
//! - Club name and the book currently being read
//! - The attendee roster seed, split by native language
//!
//! Configuration is stored at `~/.config/violetas/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use super::data_dir;
use crate::clock::ClockConfig;
use crate::error::{ConfigError, ValidationError};
use crate::partition::{GroupsConfig, DEFAULT_MIN_ATTENDEES};
use crate::roster::Roster;

/// Club naming shown by hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubConfig {
    #[serde(default = "default_club_name")]
    pub name: String,
    #[serde(default = "default_book_title_en")]
    pub book_title_en: String,
    #[serde(default = "default_book_title_es")]
    pub book_title_es: String,
}

/// Full member list. Everyone starts out present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSeed {
    #[serde(default)]
    pub english: Vec<String>,
    #[serde(default)]
    pub spanish: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/violetas/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub groups: GroupsConfig,
    #[serde(default)]
    pub club: ClubConfig,
    #[serde(default)]
    pub roster: RosterSeed,
}

fn default_club_name() -> String {
    "Las Violetas".into()
}
fn default_book_title_en() -> String {
    "The Paris Apartment".into()
}
fn default_book_title_es() -> String {
    "Un apartamento en París".into()
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            name: default_club_name(),
            book_title_en: default_book_title_en(),
            book_title_es: default_book_title_es(),
        }
    }
}

impl Default for RosterSeed {
    fn default() -> Self {
        Self {
            english: ["Amanda", "Belle", "Cliona", "Dottie", "Kim", "Sharon"]
                .map(String::from)
                .to_vec(),
            spanish: ["Ángel", "Jorge", "Nuria"].map(String::from).to_vec(),
        }
    }
}

impl RosterSeed {
    /// Build the starting roster with every member present.
    ///
    /// # Errors
    ///
    /// Fails if a name is blank or listed under both languages.
    pub fn to_roster(&self) -> Result<Roster, ValidationError> {
        Roster::new(self.english.iter().cloned(), self.spanish.iter().cloned())
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if matches!(parts.peek(), None | Some(&"")) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    _ if value == "null" => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Unset optionals take whatever JSON the value spells.
                    serde_json::Value::Null => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// validated, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "writing default configuration");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// See [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Check that every section is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clock.validate()?;
        if self.groups.min_attendees < DEFAULT_MIN_ATTENDEES {
            return Err(ConfigError::InvalidValue {
                key: "groups.min_attendees".into(),
                message: format!("must be at least {DEFAULT_MIN_ATTENDEES}"),
            });
        }
        self.roster
            .to_roster()
            .map_err(|e| ConfigError::InvalidValue {
                key: "roster".into(),
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

    /// Apply a dot-path assignment in memory, keeping the config valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is untouched on error.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and persist it.
    ///
    /// # Errors
    ///
    /// See [`Config::apply`]; also fails if the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }
}
