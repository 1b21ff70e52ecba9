//! Skiff - an interactive shell for Docker-like container engines
//!
//! This crate translates a Docker-CLI-like command language into calls
//! against a container-engine client, and hands interactive commands over
//! to the reference CLI when the engine API cannot serve a terminal.

pub mod cli;
pub mod engine;
pub mod shell;
pub mod storage;

use thiserror::Error;

use crate::engine::EngineError;
use crate::shell::parser::OptionFormatError;

/// Main error type for Skiff operations
#[derive(Error, Debug)]
pub enum SkiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    OptionFormat(#[from] OptionFormatError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Process spawn error: {0}")]
    Spawn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, SkiffError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "skiff";
