// src/cli.rs

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Rotates the Hidamari video wallpaper, optionally on a timer set by changeIntervalMinutes.",
    long_about = None
)]
pub struct Cli {
    /// Rotation config file. Defaults to $HIDAMARI_ROTATOR_CONFIG, then the user config directory.
    #[clap(short, long)]
    pub config: Option<String>,

    /// Hidamari's config file. Defaults to $HIDAMARI_CONFIG, then the Flatpak location.
    #[clap(long)]
    pub hidamari_config: Option<String>,

    /// Rotate once and exit, ignoring changeIntervalMinutes.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub once: bool,

    /// Do not start Hidamari; it is already running.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub no_launch: bool,

    /// Start Hidamari as a native binary instead of through Flatpak.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub native: bool,
}
