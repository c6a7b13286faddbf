// src/error.rs

use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum RotatorError {
    #[error("Failed to read config '{}': {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config '{}' is malformed: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to write config '{}': {source}", .path.display())]
    ConfigWrite { path: PathBuf, source: io::Error },

    #[error("Failed to serialize config for '{}': {source}", .path.display())]
    ConfigSerialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to scan '{}': {source}", .path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("No video files (.mp4, .mkv, .avi) found in '{}'", .0.display())]
    EmptyPool(PathBuf),

    #[error("Failed to launch '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("Failed to deliver reload signal via '{program}': {source}")]
    SignalDelivery { program: String, source: io::Error },

    #[error("Failed to determine the user's home directory")]
    HomeDirUnavailable,
}

impl RotatorError {
    /// True for the failures that come from reading or parsing a config file.
    pub fn is_config_load(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::ConfigInvalid { .. }
        )
    }
}
