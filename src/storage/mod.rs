//! On-disk state: the data directory and the shell configuration

pub mod config;
pub mod paths;

pub use config::ShellConfig;
pub use paths::SkiffPaths;
