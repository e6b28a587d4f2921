//! Config file discovery

use std::path::PathBuf;

use nix::unistd::{getuid, User};

/// Directory name under `~/.config`
pub const APP_DIR: &str = "hyprworm";

/// The current user's home directory
///
/// `$HOME` wins when set and non-empty; otherwise the passwd entry for the
/// current uid is consulted.
pub fn home_dir() -> Option<PathBuf> {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => match User::from_uid(getuid()) {
            Ok(Some(user)) => Some(user.dir),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!("Could not look up passwd entry: {}", e);
                None
            }
        },
    }
}

/// `~/.config/hyprworm/config`, if a home directory can be resolved
pub fn default_config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".config").join(APP_DIR).join("config"))
}

/// Serializes tests that touch `HOME`
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `f` with `HOME` set to `home`, restoring the original value afterwards
#[cfg(test)]
pub(crate) fn with_home<T>(home: &std::ffi::OsStr, f: impl FnOnce() -> T) -> T {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var_os("HOME");
    std::env::set_var("HOME", home);

    let result = f();

    match original {
        Some(v) => std::env::set_var("HOME", v),
        None => std::env::remove_var("HOME"),
    }
    result
}
