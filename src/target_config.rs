// src/target_config.rs

use crate::config::DATA_SOURCE_KEY;
use crate::error::RotatorError;
use crate::file_utils::{read_json, write_json};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Hidamari's config file, held as a raw JSON object so that every setting
/// the rotator does not touch is written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    path: PathBuf,
    document: Map<String, Value>,
}

impl TargetConfig {
    /// Loads Hidamari's config. The file must already exist; Hidamari creates it on first start.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid JSON or not a JSON object.
    pub fn load(path: &Path) -> Result<Self, RotatorError> {
        let value: Value = read_json(path)?.ok_or_else(|| RotatorError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: "file does not exist (has Hidamari been started once?)".into(),
        })?;

        match value {
            Value::Object(document) => Ok(Self {
                path: path.to_path_buf(),
                document,
            }),
            _ => Err(RotatorError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: "top level is not a JSON object".into(),
            }),
        }
    }

    /// Points every `data_source` slot at `video_path`.
    /// Returns the number of slots that were updated.
    ///
    /// # Errors
    ///
    /// Returns an error if `data_source` is missing or is not an object.
    pub fn set_video(&mut self, video_path: &Path) -> Result<usize, RotatorError> {
        let path = &self.path;
        let slots = self
            .document
            .get_mut(DATA_SOURCE_KEY)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| RotatorError::ConfigInvalid {
                path: path.clone(),
                reason: format!("'{}' is missing or not an object", DATA_SOURCE_KEY),
            })?;

        let video = Value::String(video_path.to_string_lossy().into_owned());
        for slot in slots.values_mut() {
            *slot = video.clone();
        }
        Ok(slots.len())
    }

    /// Returns the current `data_source` slots, if present.
    pub fn data_source(&self) -> Option<&Map<String, Value>> {
        self.document.get(DATA_SOURCE_KEY).and_then(Value::as_object)
    }

    /// Writes the whole document back to the file it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), RotatorError> {
        write_json(&self.path, &self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_target(dir: &Path, value: Value) -> PathBuf {
        let path = dir.join("config.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_set_video_fans_out_to_every_slot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_target(
            temp_dir.path(),
            json!({
                "version": 3,
                "mode": "MODE_VIDEO",
                "data_source": {
                    "Default": "/old/one.mp4",
                    "HDMI-1": "/old/two.mp4",
                    "eDP-1": ""
                },
                "is_mute": true
            }),
        );

        let mut target = TargetConfig::load(&path).unwrap();
        let updated = target
            .set_video(Path::new("/home/user/Videos/Hidamari/c.avi"))
            .unwrap();
        assert_eq!(updated, 3);
        target.save().unwrap();

        let reloaded = TargetConfig::load(&path).unwrap();
        let slots = reloaded.data_source().unwrap();
        assert!(slots
            .values()
            .all(|v| v == "/home/user/Videos/Hidamari/c.avi"));

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["mode"], "MODE_VIDEO");
        assert_eq!(raw["is_mute"], true);
        assert_eq!(raw["version"], 3);
    }

    #[test]
    fn test_set_video_without_data_source_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_target(temp_dir.path(), json!({ "mode": "MODE_VIDEO" }));

        let mut target = TargetConfig::load(&path).unwrap();
        let err = target.set_video(Path::new("/v/a.mp4")).unwrap_err();
        assert!(matches!(err, RotatorError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = TargetConfig::load(&temp_dir.path().join("config.json")).unwrap_err();
        assert!(err.is_config_load());
    }

    #[test]
    fn test_load_rejects_non_object_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_target(temp_dir.path(), json!(["not", "an", "object"]));
        assert!(TargetConfig::load(&path).is_err());
    }
}
