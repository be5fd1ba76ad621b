//! Registry document location.
//!
//! `WORKMAN_CONFIG_PATH` wins when it names an existing non-directory path;
//! otherwise the document lives in the per-OS application-data directory,
//! which is created on demand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the registry document path.
pub const CONFIG_PATH_ENV: &str = "WORKMAN_CONFIG_PATH";

/// File name of the registry document inside the application-data directory.
pub const CONFIG_FILE_NAME: &str = ".workman.config.json";

const APP_DIR_NAME: &str = "workman";

/// Resolve the registry document path for this process.
///
/// # Errors
///
/// Returns an error if no application-data directory can be determined or it
/// cannot be created.
pub fn registry_path() -> Result<PathBuf> {
    let override_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    resolve_registry_path(override_path.as_deref(), app_data_dir)
}

/// Pick the override when usable, else `<app-data>/workman/.workman.config.json`.
///
/// `app_data` is only consulted when the override is absent or rejected.
///
/// # Errors
///
/// Returns an error if `app_data` fails or the directory cannot be created.
pub fn resolve_registry_path(
    override_path: Option<&Path>,
    app_data: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = override_path {
        match std::fs::metadata(path) {
            Ok(meta) if !meta.is_dir() => return Ok(path.to_path_buf()),
            Ok(_) => tracing::warn!(
                path = %path.display(),
                "{CONFIG_PATH_ENV} points to a directory; using the default location"
            ),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "{CONFIG_PATH_ENV} is not usable; using the default location"
            ),
        }
    }

    let dir = app_data()?.join(APP_DIR_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("app data path could not be created: {}", dir.display()))?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// `%APPDATA%` on Windows, `~/.config` elsewhere.
fn app_data_dir() -> Result<PathBuf> {
    if cfg!(windows) {
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("APPDATA environment variable not set"))
    } else {
        dirs::home_dir()
            .map(|home| home.join(".config"))
            .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
    }
}
