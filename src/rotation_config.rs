// src/rotation_config.rs

use crate::error::RotatorError;
use crate::file_utils::{read_json, write_json};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// The rotator's persisted settings.
/// Sections other than `HidamariWallpapers` are kept as-is so that they survive a save.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RotationConfig {
    #[serde(rename = "HidamariWallpapers", default)]
    pub wallpapers: WallpaperSettings,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperSettings {
    /// Directory scanned for videos. `~` is expanded when resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallpaper_directory: Option<String>,
    /// File names picked so far in the current cycle, oldest first.
    #[serde(default)]
    pub used_wallpapers_list: Vec<String>,
    /// Minutes between rotations. Absent or `0` means rotate once.
    /// Kept as a JSON number so a hand-written `15` is saved back as `15`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_interval_minutes: Option<Number>,
    /// Keys of this section the rotator does not use, written back unchanged.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl WallpaperSettings {
    /// Returns the rotation interval in minutes, or `None` when the rotator
    /// should not loop (absent, zero, negative or not a finite number).
    pub fn change_interval(&self) -> Option<f64> {
        match self.change_interval_minutes.as_ref().and_then(Number::as_f64) {
            Some(minutes) if minutes.is_finite() && minutes > 0.0 => Some(minutes),
            Some(minutes) if minutes != 0.0 => {
                warn!(
                    "Ignoring invalid changeIntervalMinutes value {}; treating it as 0.",
                    minutes
                );
                None
            }
            _ => None,
        }
    }
}

impl RotationConfig {
    /// Loads the rotation config. A missing file yields the default (empty) config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RotatorError> {
        Ok(read_json(path)?.unwrap_or_default())
    }

    /// Writes the whole config back to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<(), RotatorError> {
        write_json(path, self)
    }
}
