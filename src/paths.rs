//! Where the app keeps its config file and logs.
//!
//! Development runs (cargo run, debug builds) keep everything in the
//! working directory. Installed builds use the platform directories from
//! `dirs`, under a `pagemark` subfolder.

use std::path::PathBuf;

const APP_DIR: &str = "pagemark";
const CONFIG_FILE_NAME: &str = "pagemark.json";

/// Overrides the config file location when set
pub const CONFIG_ENV_VAR: &str = "PAGEMARK_CONFIG";

/// Directories the app writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    Config,
    Data,
    Logs,
}

impl AppDir {
    /// Resolve the directory, `None` if the platform has no such location
    pub fn resolve(self, dev_mode: bool) -> Option<PathBuf> {
        if dev_mode {
            let local = PathBuf::from(".");
            return Some(match self {
                AppDir::Logs => local.join("logs"),
                _ => local,
            });
        }
        match self {
            // Only Linux separates config from data
            AppDir::Config if cfg!(target_os = "linux") => {
                dirs::config_dir().map(|p| p.join(APP_DIR))
            }
            AppDir::Config | AppDir::Data => dirs::data_dir().map(|p| p.join(APP_DIR)),
            AppDir::Logs => AppDir::Data.resolve(false).map(|p| p.join("logs")),
        }
    }
}

/// Cargo sets `CARGO` for `cargo run`; debug builds count as development too
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

pub fn config_file() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    AppDir::Config
        .resolve(is_dev_mode())
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

pub fn logs_dir() -> PathBuf {
    AppDir::Logs
        .resolve(is_dev_mode())
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Create the config and log directories of an installed build.
/// Runs before logging is set up.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        return Ok(());
    }
    for dir in [AppDir::Config, AppDir::Logs] {
        if let Some(path) = dir.resolve(false) {
            std::fs::create_dir_all(path)?;
        }
    }
    Ok(())
}
