//! Logging init: append to a log file, or fall back to stderr.
//!
//! The log file is, in order of preference: `$DLSHARE_LOG_FILE`, `dlshare.log`
//! next to an explicit `--config` file, `$XDG_STATE_HOME/dlshare/dlshare.log`.

use anyhow::{anyhow, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file explicitly.
pub const LOG_FILE_ENV: &str = "DLSHARE_LOG_FILE";

const LOG_FILE_NAME: &str = "dlshare.log";
const DEFAULT_FILTER: &str = "info,dlshare=debug,dlshare_core=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Override or config-relative log path, if either applies. Empty overrides are ignored.
fn explicit_log_path(env_override: Option<OsString>, config: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    config.map(|cfg| {
        cfg.parent()
            .unwrap_or_else(|| Path::new(""))
            .join(LOG_FILE_NAME)
    })
}

/// Where log lines go for a run that uses `config` (the `--config` argument, if any).
pub fn log_file_path(config: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_log_path(std::env::var_os(LOG_FILE_ENV), config) {
        return Ok(path);
    }
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dlshare")?;
    Ok(xdg_dirs.get_state_home().join(LOG_FILE_NAME))
}

/// Appends structured logs to `path`, creating its directory.
/// Errors leave no subscriber installed, so the caller can fall back to stderr.
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {}", e))?;

    tracing::info!("dlshare logging to {}", path.display());
    Ok(())
}

/// Logs to stderr. Use when `init_logging` fails so the CLI still runs.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
