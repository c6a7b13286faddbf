// src/hidamari.rs

use crate::config::{
    LAUNCH_ARGS, LAUNCH_PROGRAM, NATIVE_LAUNCH_ARGS, NATIVE_LAUNCH_PROGRAM, RELOAD_ARGS,
    RELOAD_PROGRAM,
};
use crate::error::RotatorError;
use log::debug;
use std::process::Stdio;
use tokio::process::Command;

/// The wallpaper application whose config the rotator rewrites.
pub trait WallpaperApp {
    /// Starts the application in the background without waiting for it.
    fn launch(&self) -> Result<(), RotatorError>;

    /// Asks the running application to re-read its config. No reply is awaited.
    fn request_reload(&self) -> Result<(), RotatorError>;
}

/// Hidamari, started through Flatpak and reloaded through its D-Bus server object.
#[derive(Debug, Clone)]
pub struct Hidamari {
    launch_program: String,
    launch_args: Vec<String>,
    reload_program: String,
    reload_args: Vec<String>,
}

impl Default for Hidamari {
    fn default() -> Self {
        Hidamari {
            launch_program: LAUNCH_PROGRAM.to_owned(),
            launch_args: LAUNCH_ARGS.iter().map(|s| s.to_string()).collect(),
            reload_program: RELOAD_PROGRAM.to_owned(),
            reload_args: RELOAD_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Hidamari {
    /// Hidamari installed from a distribution package rather than Flatpak.
    pub fn native() -> Self {
        let defaults = Self::default();
        Self::with_commands(
            (
                NATIVE_LAUNCH_PROGRAM.to_owned(),
                NATIVE_LAUNCH_ARGS.iter().map(|s| s.to_string()).collect(),
            ),
            (defaults.reload_program, defaults.reload_args),
        )
    }

    /// Uses custom launch and reload commands, each given as program and arguments.
    pub fn with_commands(
        launch: (String, Vec<String>),
        reload: (String, Vec<String>),
    ) -> Self {
        Hidamari {
            launch_program: launch.0,
            launch_args: launch.1,
            reload_program: reload.0,
            reload_args: reload.1,
        }
    }
}

/// Spawns `program` detached from our stdio. The child handle is dropped right away;
/// tokio reaps the process once it exits.
fn spawn_detached(program: &str, args: &[String]) -> std::io::Result<()> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    debug!("Spawned '{}' (pid {:?}).", program, child.id());
    Ok(())
}

impl WallpaperApp for Hidamari {
    fn launch(&self) -> Result<(), RotatorError> {
        spawn_detached(&self.launch_program, &self.launch_args).map_err(|source| {
            RotatorError::Launch {
                program: self.launch_program.clone(),
                source,
            }
        })
    }

    fn request_reload(&self) -> Result<(), RotatorError> {
        spawn_detached(&self.reload_program, &self.reload_args).map_err(|source| {
            RotatorError::SignalDelivery {
                program: self.reload_program.clone(),
                source,
            }
        })
    }
}
