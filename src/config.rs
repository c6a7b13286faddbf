// src/config.rs

/// Recognized video file extensions, matched case-sensitively against the end of the file name.
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mkv", ".avi"];
/// The application name, used for the application-specific config directory.
pub const APP_NAME: &str = "hidamari_rotator";
/// The filename of the rotation config inside the application config directory.
pub const ROTATION_CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the rotation config location.
pub const ROTATION_CONFIG_ENV: &str = "HIDAMARI_ROTATOR_CONFIG";
/// Environment variable overriding the Hidamari config location.
pub const HIDAMARI_CONFIG_ENV: &str = "HIDAMARI_CONFIG";

/// Wallpaper directory used when the rotation config names none, relative to the home directory.
pub const DEFAULT_WALLPAPER_DIR: &str = "Videos/Hidamari";
/// Hidamari's own config file for the Flatpak install, relative to the home directory.
pub const HIDAMARI_CONFIG_PATH: &str =
    ".var/app/io.github.jeffshee.Hidamari/config/hidamari/config.json";

/// Key of the slot mapping inside Hidamari's config.
pub const DATA_SOURCE_KEY: &str = "data_source";

/// Command used to start Hidamari in background mode.
pub const LAUNCH_PROGRAM: &str = "flatpak";
pub const LAUNCH_ARGS: &[&str] = &["run", "io.github.jeffshee.Hidamari", "-b"];
/// Same, for a Hidamari installed from a distribution package.
pub const NATIVE_LAUNCH_PROGRAM: &str = "hidamari";
pub const NATIVE_LAUNCH_ARGS: &[&str] = &["-b"];

/// Command used to ask a running Hidamari to re-read its config over the session bus.
pub const RELOAD_PROGRAM: &str = "dbus-send";
pub const RELOAD_ARGS: &[&str] = &[
    "--session",
    "--type=method_call",
    "--dest=io.github.jeffshee.Hidamari.server",
    "/io/github/jeffshee/Hidamari/server",
    "io.github.jeffshee.Hidamari.server.reload",
];
