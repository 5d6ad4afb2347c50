//! On-disk configuration for the edflow CLI

use std::{
    fs,
    path::{Path, PathBuf}
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{adapter::StoreType, domain::person::Person, domain::role::Role};

/// Configuration structure for the edflow CLI
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Repository backend to use
    pub storage: StoreType,
    /// RocksDB database path; defaults to the data directory when unset
    pub db_path: Option<PathBuf>,
    /// People known to the journal, keyed by email
    #[serde(default)]
    pub people:  Vec<Person>
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StoreType::RocksDb,
            db_path: None,
            people:  vec![
                Person::new("Eugene Callahan", "ec@nyu.edu", "NYU").with_role(Role::Editor),
                Person::new("Aya Elfettahi", "aae2042@nyu.edu", "NYU").with_role(Role::Author),
            ]
        }
    }
}

/// Get the project directories for cross-platform config path resolution
pub fn get_project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "edflow").context("Failed to determine project directories")
}

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
    let project_dirs = get_project_dirs()?;
    Ok(project_dirs.config_dir().to_path_buf())
}

/// Get the config file path
pub fn get_config_file_path() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.yaml"))
}

/// Get the default database path
pub fn get_default_db_path() -> Result<PathBuf> {
    let project_dirs = get_project_dirs()?;
    Ok(project_dirs.data_dir().join("manuscripts.db"))
}

/// Load configuration from file or create default if it doesn't exist
pub fn load_config() -> Result<Config> {
    let config_path = get_config_file_path()?;

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        serde_yaml::from_str(&content).with_context(|| "Failed to parse config file")
    } else {
        let config = Config::default();
        save_config(&config)?;
        Ok(config)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config) -> Result<()> {
    let config_path = get_config_file_path()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = serde_yaml::to_string(config).context("Failed to serialize config")?;

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    Ok(())
}

/// Resolve the database path from config or the platform default
pub fn resolve_db_path(config: &Config) -> Result<PathBuf> {
    match &config.db_path {
        Some(path) => Ok(path.clone()),
        None => {
            let path = get_default_db_path()?;
            if let Some(parent) = path.parent() {
                ensure_dir(parent)?;
            }
            Ok(path)
        }
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("Failed to create data directory: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(back.storage, StoreType::RocksDb);
        assert_eq!(back.people.len(), 2);
        assert_eq!(back.people[0].email, "ec@nyu.edu");
    }
}
