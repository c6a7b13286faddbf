// src/scheduler.rs

use crate::error::RotatorError;
use crate::file_utils::{expand_path, ConfigPaths};
use crate::hidamari::WallpaperApp;
use crate::rotation_config::RotationConfig;
use crate::selector::Selector;
use crate::target_config::TargetConfig;
use chrono::{Local, TimeDelta};
use log::{debug, error, info, warn};
use serde_json::Number;
use std::{
    future::Future,
    path::{Path, PathBuf},
    pin::Pin,
    time::Duration,
};

/// Phases of the rotation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Load the rotation config and resolve the wallpaper directory.
    Init,
    /// First rotation, before the wallpaper app is started.
    Rotate,
    /// Start the wallpaper app and read the interval.
    Launch,
    /// Sleep for the current interval, then re-read it.
    Wait,
    /// Rotate again and ask the running app to reload.
    Reload,
    Stopped,
}

/// Whether a rotation reached Hidamari's config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RotationOutcome {
    Applied,
    TargetNotUpdated,
}

/// Drives rotations: one at startup, then one per interval for as long as
/// `changeIntervalMinutes` stays non-zero.
///
/// Both config files are read and rewritten whole on every access. This process
/// is assumed to be their only writer while it runs; edits made by hand between
/// two accesses are picked up, but nothing guards against concurrent writes.
pub struct Scheduler<A> {
    paths: ConfigPaths,
    default_directory: PathBuf,
    selector: Selector,
    app: A,
    launch_app: bool,
    single_rotation: bool,
    state: SchedulerState,
    directory: PathBuf,
    interval_minutes: f64,
}

fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::try_from_secs_f64(minutes * 60.0).unwrap_or(Duration::MAX)
}

impl<A: WallpaperApp> Scheduler<A> {
    /// Creates a scheduler in the `Init` state.
    ///
    /// * `paths` - Where the rotation config and Hidamari's config live.
    /// * `default_directory` - Used (and persisted) when the config names no existing directory.
    pub fn new(
        paths: ConfigPaths,
        default_directory: PathBuf,
        selector: Selector,
        app: A,
    ) -> Self {
        Scheduler {
            paths,
            default_directory,
            selector,
            app,
            launch_app: true,
            single_rotation: false,
            state: SchedulerState::Init,
            directory: PathBuf::new(),
            interval_minutes: 0.0,
        }
    }

    /// When false, the app is assumed to be running already and is not started.
    pub fn launch_app(mut self, launch: bool) -> Self {
        self.launch_app = launch;
        self
    }

    /// When true, stop after the first rotation whatever the configured interval.
    pub fn single_rotation(mut self, once: bool) -> Self {
        self.single_rotation = once;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Runs the state machine until it stops.
    ///
    /// `shutdown` is only polled while waiting between rotations; when it resolves
    /// the scheduler stops without rotating again.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotation config cannot be loaded at startup, or if
    /// the first selection fails. Failures inside the loop are logged instead.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<(), RotatorError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let next = match self.state {
                SchedulerState::Init => self.init().map(|()| SchedulerState::Rotate),
                SchedulerState::Rotate => self.rotate().map(|_| SchedulerState::Launch),
                SchedulerState::Launch => self.launch(),
                SchedulerState::Wait => Ok(self.wait(shutdown.as_mut()).await),
                SchedulerState::Reload => Ok(self.reload()),
                SchedulerState::Stopped => return Ok(()),
            };

            match next {
                Ok(next) => {
                    debug!("Scheduler: {:?} -> {:?}", self.state, next);
                    self.state = next;
                }
                Err(e) => {
                    self.state = SchedulerState::Stopped;
                    return Err(e);
                }
            }
        }
    }

    /// Resolves the wallpaper directory, substituting and persisting the default
    /// when the configured one is missing or does not exist.
    fn init(&mut self) -> Result<(), RotatorError> {
        let mut config = RotationConfig::load(&self.paths.rotation)?;

        let configured = config
            .wallpapers
            .wallpaper_directory
            .as_deref()
            .map(expand_path);

        match configured {
            Some(dir) if dir.is_dir() => {
                self.directory = dir;
            }
            other => {
                match other {
                    Some(dir) => warn!(
                        "Wallpaper directory '{}' does not exist; using default '{}'.",
                        dir.display(),
                        self.default_directory.display()
                    ),
                    None => info!(
                        "No wallpaper directory configured; using default '{}'.",
                        self.default_directory.display()
                    ),
                }
                config.wallpapers.wallpaper_directory =
                    Some(self.default_directory.to_string_lossy().into_owned());
                if let Err(e) = config.save(&self.paths.rotation) {
                    warn!("Could not persist the default wallpaper directory: {}", e);
                }
                self.directory = self.default_directory.clone();
            }
        }

        info!("Rotating wallpapers from '{}'.", self.directory.display());
        Ok(())
    }

    /// Picks the next video, persists the used list, then points Hidamari at it.
    /// A failure while updating Hidamari's config is logged; the used list stays persisted.
    fn rotate(&mut self) -> Result<RotationOutcome, RotatorError> {
        let mut config = RotationConfig::load(&self.paths.rotation)?;

        let selection = self
            .selector
            .select_next(&self.directory, &config.wallpapers.used_wallpapers_list)?;
        if selection.rolled_over {
            info!(
                "Every video in '{}' has been shown; starting a new cycle.",
                self.directory.display()
            );
        }
        info!("Selected '{}'.", selection.path.display());

        config.wallpapers.used_wallpapers_list = selection.used;
        config.save(&self.paths.rotation)?;

        match self.apply_to_target(&selection.path) {
            Ok(slots) => {
                info!("Updated {} Hidamari video slot(s).", slots);
                Ok(RotationOutcome::Applied)
            }
            Err(e) => {
                error!(
                    "Selected '{}' but could not update Hidamari's config: {}",
                    selection.file_name, e
                );
                Ok(RotationOutcome::TargetNotUpdated)
            }
        }
    }

    fn apply_to_target(&self, video: &Path) -> Result<usize, RotatorError> {
        let mut target = TargetConfig::load(&self.paths.target)?;
        let slots = target.set_video(video)?;
        if let Some(slot_names) = target.data_source().map(|m| m.keys().collect::<Vec<_>>()) {
            debug!("Hidamari slots: {:?}", slot_names);
        }
        if slots == 0 {
            warn!(
                "Hidamari's config at '{}' has no video slots to update.",
                self.paths.target.display()
            );
        }
        target.save()?;
        Ok(slots)
    }

    /// Starts the app, then decides between looping and stopping.
    /// An absent interval is persisted as `0`.
    fn launch(&mut self) -> Result<SchedulerState, RotatorError> {
        if self.launch_app {
            match self.app.launch() {
                Ok(()) => info!("Started the wallpaper application."),
                Err(e) => error!("{}", e),
            }
        }

        if self.single_rotation {
            info!("Single rotation requested; not scheduling further rotations.");
            return Ok(SchedulerState::Stopped);
        }

        let mut config = RotationConfig::load(&self.paths.rotation)?;
        if config.wallpapers.change_interval_minutes.is_none() {
            config.wallpapers.change_interval_minutes = Some(Number::from(0));
            if let Err(e) = config.save(&self.paths.rotation) {
                warn!("Could not persist the default change interval: {}", e);
            }
        }

        match config.wallpapers.change_interval() {
            Some(minutes) => {
                self.interval_minutes = minutes;
                info!("Rotating every {} minute(s).", minutes);
                Ok(SchedulerState::Wait)
            }
            None => {
                info!("changeIntervalMinutes is 0; rotating once.");
                Ok(SchedulerState::Stopped)
            }
        }
    }

    /// Sleeps for the current interval, then re-reads it from the rotation config.
    async fn wait<F>(&mut self, shutdown: Pin<&mut F>) -> SchedulerState
    where
        F: Future<Output = ()>,
    {
        let period = minutes_to_duration(self.interval_minutes);
        if let Some(next) = TimeDelta::from_std(period)
            .ok()
            .and_then(|delta| Local::now().checked_add_signed(delta))
        {
            info!("Next rotation at {}.", next.format("%Y-%m-%d %H:%M:%S"));
        }

        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = shutdown => {
                info!("Shutdown requested; stopping rotation.");
                return SchedulerState::Stopped;
            }
        }

        let config = match RotationConfig::load(&self.paths.rotation) {
            Ok(config) => config,
            Err(e) => {
                error!("{}. Skipping this rotation.", e);
                return SchedulerState::Wait;
            }
        };

        match config.wallpapers.change_interval() {
            None => {
                info!("changeIntervalMinutes was set to 0; stopping rotation.");
                SchedulerState::Stopped
            }
            Some(minutes) if minutes != self.interval_minutes => {
                info!(
                    "Change interval updated from {} to {} minute(s).",
                    self.interval_minutes, minutes
                );
                self.interval_minutes = minutes;
                SchedulerState::Reload
            }
            Some(_) => SchedulerState::Reload,
        }
    }

    /// Rotates and signals the running app. Failures are logged and retried at the next wake.
    fn reload(&mut self) -> SchedulerState {
        match self.rotate() {
            Ok(RotationOutcome::Applied) => match self.app.request_reload() {
                Ok(()) => info!("Asked the wallpaper application to reload."),
                Err(e) => error!("{}", e),
            },
            Ok(RotationOutcome::TargetNotUpdated) => {
                warn!("Hidamari's config was not updated; not sending a reload.");
            }
            Err(e) => error!("Rotation failed: {}. Trying again at the next interval.", e),
        }
        SchedulerState::Wait
    }
}
