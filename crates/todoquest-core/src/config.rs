//! TOML-based application configuration.
//!
//! Stores user preferences: daily goal, XP reward, pomodoro length, theme
//! and language. Tasks themselves are never persisted.
//!
//! Configuration is stored at `~/.config/todoquest/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// UI theme. The presentation layer maps these to actual styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Ocean,
    Forest,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "ocean" => Ok(Theme::Ocean),
            "forest" => Ok(Theme::Forest),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/todoquest/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completions per day needed to advance the streak.
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    /// XP awarded per completed task.
    #[serde(default = "default_xp_reward")]
    pub xp_reward: u32,
    /// Pomodoro length in minutes.
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_minutes: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
}

fn default_daily_goal() -> u32 {
    5
}
fn default_xp_reward() -> u32 {
    10
}
fn default_pomodoro_minutes() -> u32 {
    25
}

impl Default for Config {
    fn default() -> Self {
        Config {
            daily_goal: default_daily_goal(),
            xp_reward: default_xp_reward(),
            pomodoro_minutes: default_pomodoro_minutes(),
            theme: Theme::default(),
            language: Language::default(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("todoquest").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_goal == 0 {
            return Err(ConfigError::InvalidValue {
                key: "daily_goal".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.pomodoro_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pomodoro_minutes".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = Config::default();
        assert_eq!(config.daily_goal, 5);
        assert_eq!(config.xp_reward, 10);
        assert_eq!(config.pomodoro_minutes, 25);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.daily_goal, 5);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            daily_goal: 3,
            theme: Theme::Ocean,
            ..Config::default()
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.daily_goal, 3);
        assert_eq!(loaded.theme, Theme::Ocean);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("daily_goal = 7").unwrap();
        assert_eq!(config.daily_goal, 7);
        assert_eq!(config.xp_reward, 10);
        assert_eq!(config.pomodoro_minutes, 25);
    }

    #[test]
    fn zero_goal_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "daily_goal = 0").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
