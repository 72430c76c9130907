// src/config.rs
// Application configuration loaded from config.yml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::modules::user_quest::NewQuest;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV_VAR: &str = "QUEST_TRACKER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./config.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub export_path: PathBuf,
    pub user: UserConfig,
    pub seed_quests: Vec<NewQuest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub email: String,
    pub role: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            email: "you@example.com".to_string(),
            role: "user".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./db/quests.db"),
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
            export_path: PathBuf::from("./quests-by-status.json"),
            user: UserConfig::default(),
            seed_quests: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads from `$QUEST_TRACKER_CONFIG`, falling back to `./config.yml`.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::load_from_path(&path)
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_from_path(&temp_dir.path().join("config.yml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        fs::write(
            &path,
            "log_level: debug\n\
             user:\n  email: sam@example.com\n\
             seed_quests:\n  - { title: Court order, category: core, jurisdiction: MA }\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();

        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(config.user.email, "sam@example.com");
        assert_eq!(config.user.role, "user");
        assert_eq!(config.database_path, PathBuf::from("./db/quests.db"));
        assert_eq!(config.seed_quests.len(), 1);
        assert_eq!(config.seed_quests[0].category, "core");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        fs::write(&path, "seed_quests: [oops").unwrap();

        assert!(AppConfig::load_from_path(&path).is_err());
    }
}
