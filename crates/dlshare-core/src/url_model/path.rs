//! Destination path for a download.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::file_name_for_url;

/// Returns `dir/<name derived from url>`, creating `dir` if needed and deleting
/// any file already at that path.
pub fn prepare_temporary_file(dir: &Path, url: &str, max_name_chars: usize) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("create download dir {}", dir.display()))?;
    let path = dir.join(file_name_for_url(url, max_name_chars));
    tracing::debug!(file = %path.display(), "temporary file");
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("remove existing file {}", path.display()))?;
    }
    Ok(path)
}
