// src/main.rs

use clap::Parser;
use log::{debug, error, info};
use std::env;
use std::path::PathBuf;
use std::process;

// Module declarations
mod cli;
mod config;
mod error;
mod file_utils;
mod hidamari;
mod rotation_config;
mod scheduler;
mod selector;
mod signal;
mod target_config;

use crate::cli::Cli;
use crate::config::{HIDAMARI_CONFIG_ENV, ROTATION_CONFIG_ENV};
use crate::error::RotatorError;
use crate::file_utils::{
    default_rotation_config_path, default_target_config_path, default_wallpaper_dir, expand_path,
    ConfigPaths,
};
use crate::hidamari::Hidamari;
use crate::scheduler::Scheduler;
use crate::selector::Selector;
use crate::signal::ShutdownSignals;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run_app().await {
        error!("{}", err);
        if err.is_config_load() {
            error!("Check the config file named above; it was left unchanged.");
        }
        process::exit(1);
    }
}

/// Picks the first of: the CLI value, the environment variable, the default.
fn resolve_path(
    flag: Option<String>,
    env_key: &str,
    default: impl FnOnce() -> Result<PathBuf, RotatorError>,
) -> Result<PathBuf, RotatorError> {
    match flag.or_else(|| env::var(env_key).ok()) {
        Some(raw) => Ok(expand_path(&raw)),
        None => default(),
    }
}

async fn run_app() -> Result<(), RotatorError> {
    let cli_args = Cli::parse();

    let paths = ConfigPaths {
        rotation: resolve_path(
            cli_args.config,
            ROTATION_CONFIG_ENV,
            default_rotation_config_path,
        )?,
        target: resolve_path(
            cli_args.hidamari_config,
            HIDAMARI_CONFIG_ENV,
            default_target_config_path,
        )?,
    };
    info!(
        "Rotation config: '{}', Hidamari config: '{}'.",
        paths.rotation.display(),
        paths.target.display()
    );

    let app = if cli_args.native {
        Hidamari::native()
    } else {
        Hidamari::default()
    };

    let mut scheduler = Scheduler::new(paths, default_wallpaper_dir()?, Selector::new(), app)
        .launch_app(!cli_args.no_launch)
        .single_rotation(cli_args.once);

    let signals = match ShutdownSignals::install() {
        Ok(signals) => Some(signals),
        Err(e) => {
            error!("Could not listen for shutdown signals: {}", e);
            None
        }
    };
    let shutdown = async move {
        match signals {
            Some(mut signals) => {
                let name = signals.recv().await;
                info!("Received {}, stopping.", name);
            }
            None => std::future::pending::<()>().await,
        }
    };

    scheduler.run(shutdown).await?;
    debug!("Scheduler finished in state {:?}.", scheduler.state());
    Ok(())
}
