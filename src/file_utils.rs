// src/file_utils.rs

use crate::config::{
    APP_NAME, DEFAULT_WALLPAPER_DIR, HIDAMARI_CONFIG_PATH, ROTATION_CONFIG_FILE_NAME,
    VIDEO_EXTENSIONS,
};
use crate::error::RotatorError;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Locations of the two config files the rotator reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPaths {
    /// The rotator's own settings (directory, used list, interval).
    pub rotation: PathBuf,
    /// Hidamari's config, whose `data_source` slots receive the selected video.
    pub target: PathBuf,
}

fn home_dir() -> Result<PathBuf, RotatorError> {
    dirs::home_dir().ok_or(RotatorError::HomeDirUnavailable)
}

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Returns the default location of the rotation config,
/// `<config_dir>/hidamari_rotator/config.json`.
///
/// # Errors
///
/// Returns an error if neither the system config directory nor the home directory can be determined.
pub fn default_rotation_config_path() -> Result<PathBuf, RotatorError> {
    let base = match dirs::config_dir() {
        Some(dir) => dir,
        None => home_dir()?.join(".config"),
    };
    Ok(base.join(APP_NAME).join(ROTATION_CONFIG_FILE_NAME))
}

/// Returns the config file of the Flatpak Hidamari install.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_target_config_path() -> Result<PathBuf, RotatorError> {
    Ok(home_dir()?.join(HIDAMARI_CONFIG_PATH))
}

/// Returns `~/Videos/Hidamari`, the directory used when none is configured.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_wallpaper_dir() -> Result<PathBuf, RotatorError> {
    Ok(home_dir()?.join(DEFAULT_WALLPAPER_DIR))
}

/// True if the file name ends with one of the recognized video extensions.
pub fn is_video_file_name(name: &str) -> bool {
    VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Lists the video files directly inside `folder_path`, sorted by name.
/// Only file names are returned; subdirectories are not scanned.
///
/// # Errors
///
/// Returns an error if `folder_path` is not a directory or cannot be read.
pub fn find_video_files(folder_path: &Path) -> Result<Vec<String>, RotatorError> {
    if !folder_path.is_dir() {
        return Err(RotatorError::NotADirectory(folder_path.to_path_buf()));
    }

    let mut video_files = Vec::new();

    let walker = WalkDir::new(folder_path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry_result in walker {
        let entry = entry_result.map_err(|source| RotatorError::Scan {
            path: folder_path.to_path_buf(),
            source,
        })?;

        // Follows symlinks so linked videos still count.
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_video_file_name(name) {
                video_files.push(name.to_owned());
            }
        }
    }
    Ok(video_files)
}

/// Reads and deserializes a whole JSON document.
/// Returns `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RotatorError> {
    match File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .map(Some)
                .map_err(|source| RotatorError::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(RotatorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Serializes `value` with four-space indentation and replaces the whole file with it.
/// Missing parent directories are created.
///
/// The document is written to a temporary file in the same directory and renamed
/// over `path`, so an interrupted write leaves the previous file intact.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RotatorError> {
    let to_write_error = |source: io::Error| RotatorError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut contents = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut contents, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| RotatorError::ConfigSerialize {
            path: path.to_path_buf(),
            source,
        })?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(to_write_error)?;

    let mut staged = NamedTempFile::new_in(parent).map_err(to_write_error)?;
    if let Ok(metadata) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(to_write_error)?;
    }
    staged.write_all(&contents).map_err(to_write_error)?;
    staged.as_file().sync_all().map_err(to_write_error)?;
    staged.persist(path).map_err(|e| to_write_error(e.error))?;
    Ok(())
}
