use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::FetchOptions;

/// Media type declared on share requests unless sniffing is enabled.
pub const DEFAULT_SHARE_CONTENT_TYPE: &str = "image/jpeg";

/// Share handoff settings (optional `[share]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Program and arguments to hand the file to. `{path}`, `{uri}` and `{mime}`
    /// are substituted. When unset, the share request is printed as JSON.
    pub command: Option<Vec<String>>,
    /// Media type declared on every share request.
    pub content_type: String,
    /// Declare the sniffed image type instead of `content_type` when the format is known.
    pub sniff_content_type: bool,
}

fn default_content_type() -> String {
    DEFAULT_SHARE_CONTENT_TYPE.to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            command: None,
            content_type: default_content_type(),
            sniff_content_type: false,
        }
    }
}

/// Global configuration loaded from `~/.config/dlshare/config.toml`.
///
/// Every key is optional; missing keys take the `Default` value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DlshareConfig {
    /// Directory the downloaded file is written to. None = the user's Downloads directory.
    pub download_dir: Option<PathBuf>,
    /// Maximum length of the derived file name, in characters. Must be at least 1.
    pub max_name_chars: usize,
    /// Optional cap on the response body in bytes (None = unbounded).
    pub max_body_bytes: Option<u64>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Abort when the transfer stays below this many bytes/sec for `low_speed_time_secs`.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    pub share: ShareConfig,
}

impl Default for DlshareConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            max_name_chars: 80,
            max_body_bytes: None,
            connect_timeout_secs: 30,
            timeout_secs: 300,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            share: ShareConfig::default(),
        }
    }
}

impl DlshareConfig {
    /// Rejects settings no flow can run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_name_chars == 0 {
            bail!("max_name_chars must be at least 1");
        }
        Ok(())
    }

    /// Transport options for the downloader.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            low_speed_limit: self.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Directory downloads land in: configured dir, else the user's Downloads dir,
    /// else `~/Downloads`.
    pub fn resolve_download_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.download_dir {
            return Ok(dir.clone());
        }
        if let Some(dir) = dirs::download_dir() {
            return Ok(dir);
        }
        dirs::home_dir()
            .map(|home| home.join("Downloads"))
            .context("no Downloads directory and no home directory")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dlshare")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<DlshareConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: DlshareConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DlshareConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DlshareConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
