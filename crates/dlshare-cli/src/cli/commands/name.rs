//! `dlshare name <url>` – show the derived download file name.

use anyhow::Result;
use dlshare_core::config::DlshareConfig;
use dlshare_core::url_model;
use std::io::Write;

pub fn run_name(cfg: &DlshareConfig, url: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", url_model::file_name_for_url(url, cfg.max_name_chars))?;
    Ok(())
}
