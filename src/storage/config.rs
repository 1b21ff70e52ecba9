//! Shell configuration stored as JSON in the data directory

use crate::storage::paths::SkiffPaths;
use crate::{Result, SkiffError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_HOST: &str = "unix:///var/run/docker.sock";

/// User settings; fields missing from the file take their defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Engine address, overriding DOCKER_HOST
    pub docker_host: Option<String>,
    /// Seconds to wait for non-streaming engine calls
    pub client_timeout: u64,
    /// Reference CLI used for interactive commands
    pub external_cli: String,
    /// Rebuild reference CLI command lines with long flag names
    pub long_option_names: bool,
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            docker_host: None,
            client_timeout: 10,
            external_cli: "docker".to_string(),
            long_option_names: false,
            log_level: "info".to_string(),
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| SkiffError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read `path`, or the default config file, writing defaults on first start
    pub fn load_or_init(paths: &SkiffPaths, path: Option<&Path>) -> Result<Self> {
        let default_path = paths.config_file();
        let path = path.unwrap_or(&default_path);
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let config = Self::default();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        config.save(path)?;
        debug!(path = %path.display(), "wrote default config");
        Ok(config)
    }

    /// Engine address: the config value, then DOCKER_HOST, then the local
    /// daemon socket
    pub fn engine_host(&self) -> String {
        self.docker_host
            .clone()
            .or_else(|| std::env::var("DOCKER_HOST").ok().filter(|host| !host.is_empty()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_start_writes_defaults() {
        let tmp = TempDir::new().unwrap();
        let paths = SkiffPaths::with_root(tmp.path());

        let config = ShellConfig::load_or_init(&paths, None).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert!(paths.config_file().exists());

        let reloaded = ShellConfig::load(&paths.config_file()).unwrap();
        assert_eq!(reloaded.client_timeout, 10);
        assert_eq!(reloaded.external_cli, "docker");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.json");
        fs::write(&path, r#"{"docker_host": "tcp://10.0.0.5:2375", "long_option_names": true}"#).unwrap();

        let config = ShellConfig::load_or_init(&SkiffPaths::with_root(tmp.path()), Some(&path)).unwrap();
        assert_eq!(config.docker_host.as_deref(), Some("tcp://10.0.0.5:2375"));
        assert!(config.long_option_names);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.engine_host(), "tcp://10.0.0.5:2375");
    }

    #[test]
    fn test_engine_host_falls_back_to_the_daemon_socket() {
        let config = ShellConfig::default();
        match std::env::var("DOCKER_HOST") {
            Ok(host) if !host.is_empty() => assert_eq!(config.engine_host(), host),
            _ => assert_eq!(config.engine_host(), DEFAULT_HOST),
        }
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ShellConfig::load(&path).unwrap_err();
        assert!(matches!(err, SkiffError::Config(_)));
    }
}
