// src/selector.rs

use crate::error::RotatorError;
use crate::file_utils::find_video_files;
use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

/// Outcome of a single pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The picked file name.
    pub file_name: String,
    /// `directory` joined with `file_name`, made absolute.
    pub path: PathBuf,
    /// The used list after this pick, to be persisted by the caller.
    pub used: Vec<String>,
    /// True if the used list was reset before picking.
    pub rolled_over: bool,
}

/// Picks videos without repeating any of them until the whole pool has been shown.
pub struct Selector {
    rng: StdRng,
}

impl Selector {
    /// Creates a selector seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::seed_from_u64(rand::random()))
    }

    /// Creates a selector around a given generator, e.g. a fixed seed in tests.
    pub fn with_rng(rng: StdRng) -> Self {
        Selector { rng }
    }

    /// Scans `directory` and picks the next video, excluding those in `used`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be scanned or contains no videos.
    pub fn select_next(
        &mut self,
        directory: &Path,
        used: &[String],
    ) -> Result<Selection, RotatorError> {
        let pool = find_video_files(directory)?;
        if pool.is_empty() {
            return Err(RotatorError::EmptyPool(directory.to_path_buf()));
        }
        debug!(
            "Found {} video(s) in '{}', {} already used.",
            pool.len(),
            directory.display(),
            used.len()
        );

        let (file_name, used, rolled_over) = self.choose_from(&pool, used);

        let joined = directory.join(&file_name);
        let path = std::path::absolute(&joined).unwrap_or(joined);

        Ok(Selection {
            file_name,
            path,
            used,
            rolled_over,
        })
    }

    /// Picks from a non-empty `pool`. Returns the pick, the updated used list,
    /// and whether the used list was reset first.
    fn choose_from(&mut self, pool: &[String], used: &[String]) -> (String, Vec<String>, bool) {
        let mut exclusion: Vec<String> = used.to_vec();
        let mut rolled_over = false;

        if exclusion.len() >= pool.len() {
            exclusion.clear();
            rolled_over = true;
        }

        let candidates: Vec<&String> = pool.iter().filter(|v| !exclusion.contains(*v)).collect();

        // A used list shorter than the pool always leaves at least one candidate.
        let picked = candidates
            .choose(&mut self.rng)
            .map_or_else(|| pool[0].clone(), |v| (*v).clone());

        exclusion.push(picked.clone());
        (picked, exclusion, rolled_over)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}
