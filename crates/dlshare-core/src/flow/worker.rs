//! Background half of the flow: download then probe, strictly in order.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::state::FailureKind;
use crate::downloader::{self, FetchOptions};
use crate::probe::{self, ImageBounds};
use crate::url_model;

/// What the worker hands back to the interactive side. Errors travel as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOutcome {
    Image { file: PathBuf, bounds: ImageBounds },
    Failed(FailureKind),
}

/// Everything the worker needs; moved onto the blocking thread.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub url: String,
    pub download_dir: PathBuf,
    pub max_name_chars: usize,
    pub fetch: FetchOptions,
    pub abort: Arc<AtomicBool>,
}

impl DownloadJob {
    /// Runs download and probe on the current thread. Blocks.
    pub fn run(self) -> WorkOutcome {
        let file = match url_model::prepare_temporary_file(
            &self.download_dir,
            &self.url,
            self.max_name_chars,
        ) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("could not prepare destination for {}: {:#}", self.url, e);
                return WorkOutcome::Failed(FailureKind::DownloadError);
            }
        };

        if let Err(e) =
            downloader::download_to_file(&self.url, &file, &self.fetch, Some(&self.abort))
        {
            tracing::warn!("could not download {}: {}", self.url, e);
            return WorkOutcome::Failed(FailureKind::DownloadError);
        }

        match probe::probe_bounds(&file) {
            Some(bounds) => {
                tracing::debug!(width = bounds.width, height = bounds.height, "probe ok");
                WorkOutcome::Image { file, bounds }
            }
            None => {
                tracing::info!("{} is not an image", file.display());
                WorkOutcome::Failed(FailureKind::NotAnImage)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unwritable_dir_is_download_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("Downloads");
        fs::write(&blocker, b"file, not dir").unwrap();
        let job = DownloadJob {
            url: "http://127.0.0.1:9/cat.png".to_string(),
            download_dir: blocker,
            max_name_chars: 80,
            fetch: FetchOptions::default(),
            abort: Arc::new(AtomicBool::new(false)),
        };
        assert_eq!(job.run(), WorkOutcome::Failed(FailureKind::DownloadError));
    }

    #[test]
    fn preset_abort_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let job = DownloadJob {
            url: "http://127.0.0.1:9/cat.png".to_string(),
            download_dir: dir.path().to_path_buf(),
            max_name_chars: 80,
            fetch: FetchOptions::default(),
            abort: Arc::new(AtomicBool::new(true)),
        };
        assert_eq!(job.run(), WorkOutcome::Failed(FailureKind::DownloadError));
    }
}
