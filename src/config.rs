use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "pma-migrate";
const CONFIG_FILE: &str = "pma-migrate.yaml";

fn default_server() -> u32 {
    1
}

fn default_database() -> String {
    "test".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the admin console, e.g. "http://phpmyadmin.example.com".
    pub base_url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_server")]
    pub server: u32,
    #[serde(default = "default_database")]
    pub database: String,
    /// Skip TLS certificate verification. Off by default; only acceptable
    /// against throwaway test consoles.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Return the application config directory path, creating it if missing.
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    }
    .ok_or_else(|| anyhow::anyhow!("failed to find os config dir."))?;

    path.push(APP_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_config_path()?.join(CONFIG_FILE))
}

/// Load the console configuration from `path` if given, otherwise from the
/// app config dir. Credentials may be overridden via PMA_MIGRATE_USERNAME
/// and PMA_MIGRATE_PASSWORD so they need not live in the file at all.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    let data = fs::read(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut config: Config = serde_yaml::from_slice(&data)
        .with_context(|| format!("failed to parse YAML at {}", path.display()))?;

    if let Ok(user) = std::env::var("PMA_MIGRATE_USERNAME") {
        config.username = user;
    }
    if let Ok(pass) = std::env::var("PMA_MIGRATE_PASSWORD") {
        config.password = pass;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let yaml = "base_url: http://pma.example.com\nusername: u\npassword: p\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server, 1);
        assert_eq!(config.database, "test");
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn full_config_overrides_defaults() {
        let yaml = "base_url: https://pma.example.com\nusername: u\npassword: p\nserver: 3\ndatabase: cms\naccept_invalid_certs: true\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server, 3);
        assert_eq!(config.database, "cms");
        assert!(config.accept_invalid_certs);
    }
}
