//! Path management for the ~/.skiff/ directory

use crate::{Result, SkiffError};
use std::path::{Path, PathBuf};

/// Manages the files skiff keeps in its data directory
#[derive(Debug, Clone)]
pub struct SkiffPaths {
    root: PathBuf,
}

impl SkiffPaths {
    /// Create a new SkiffPaths instance using the default root (~/.skiff/)
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            SkiffError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine user home directory. Please ensure HOME environment variable is set.",
            ))
        })?;

        Ok(Self {
            root: home.join(".skiff"),
        })
    }

    /// Create a new SkiffPaths instance with a custom root
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Shell configuration file
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Log file written by the tracing subscriber
    pub fn log_file(&self) -> PathBuf {
        self.root.join("skiff.log")
    }
}
