//! Interactive half of the flow: validate, hand off to the worker, then act once.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::state::{FailureKind, FlowState};
use super::worker::{DownloadJob, WorkOutcome};
use crate::config::DlshareConfig;
use crate::downloader::FetchOptions;
use crate::notify::Notifier;
use crate::probe::ImageBounds;
use crate::screen::Screen;
use crate::share::{ShareRequest, ShareTarget};
use crate::url_check;

/// Resolved settings for one flow run.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Absolute directory the file is downloaded into.
    pub download_dir: PathBuf,
    pub max_name_chars: usize,
    pub fetch: FetchOptions,
    /// Media type declared on the share request.
    pub content_type: String,
    /// Prefer the sniffed media type when the probe recognized the format.
    pub sniff_content_type: bool,
}

impl FlowSettings {
    pub fn new(download_dir: &Path) -> Result<Self> {
        Self::from_config(&DlshareConfig::default(), download_dir)
    }

    pub fn from_config(cfg: &DlshareConfig, download_dir: &Path) -> Result<Self> {
        let download_dir = std::path::absolute(download_dir)
            .with_context(|| format!("resolve download dir {}", download_dir.display()))?;
        Ok(Self {
            download_dir,
            max_name_chars: cfg.max_name_chars,
            fetch: cfg.fetch_options(),
            content_type: cfg.share.content_type.clone(),
            sniff_content_type: cfg.share.sniff_content_type,
        })
    }

    fn content_type_for(&self, bounds: &ImageBounds) -> &str {
        match bounds.format {
            Some(format) if self.sniff_content_type => format.media_type(),
            _ => &self.content_type,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Shared(ShareRequest),
    Failed(FailureKind),
    Abandoned,
}

/// States visited, in order, and the outcome.
#[derive(Debug, Clone)]
pub struct FlowReport {
    pub states: Vec<FlowState>,
    pub outcome: FlowOutcome,
}

impl FlowReport {
    pub fn final_state(&self) -> FlowState {
        self.states.last().copied().unwrap_or(FlowState::Idle)
    }
}

/// Drives one invocation. Consumed by `run`.
pub struct FlowController<'a> {
    settings: FlowSettings,
    share: &'a dyn ShareTarget,
    notifier: &'a dyn Notifier,
    screen: Screen,
    states: Vec<FlowState>,
}

impl<'a> FlowController<'a> {
    pub fn new(
        settings: FlowSettings,
        share: &'a dyn ShareTarget,
        notifier: &'a dyn Notifier,
        screen: Screen,
    ) -> Self {
        Self {
            settings,
            share,
            notifier,
            screen,
            states: vec![FlowState::Idle],
        }
    }

    fn current(&self) -> FlowState {
        self.states.last().copied().unwrap_or(FlowState::Idle)
    }

    fn enter(&mut self, next: FlowState) {
        let current = self.current();
        debug_assert!(
            current.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            current,
            next
        );
        tracing::debug!("flow {:?} -> {:?}", current, next);
        self.states.push(next);
    }

    fn finish(self, outcome: FlowOutcome) -> FlowReport {
        FlowReport {
            states: self.states,
            outcome,
        }
    }

    fn fail(mut self, kind: FailureKind) -> FlowReport {
        self.enter(FlowState::Failed(kind));
        self.notifier.notify(kind.notice());
        self.screen.close();
        self.finish(FlowOutcome::Failed(kind))
    }

    /// Runs the flow for the shared `input`.
    ///
    /// The worker's result is awaited exactly once; nothing user-visible happens
    /// if the screen was destroyed in the meantime.
    pub async fn run(mut self, input: Option<&str>) -> FlowReport {
        tracing::debug!(url = ?input, "shared input");
        self.enter(FlowState::Validating);
        let url = match input {
            Some(u) if url_check::is_web_url(Some(u)) => u.to_string(),
            _ => {
                tracing::warn!("invalid URL {:?}", input);
                return self.fail(FailureKind::InvalidUrl);
            }
        };

        self.enter(FlowState::Downloading);
        let job = DownloadJob {
            url,
            download_dir: self.settings.download_dir.clone(),
            max_name_chars: self.settings.max_name_chars,
            fetch: self.settings.fetch,
            abort: self.screen.abort_token(),
        };
        let joined = tokio::task::spawn_blocking(move || job.run()).await;

        if !self.screen.is_alive() {
            tracing::info!("screen gone before the download finished; dropping result");
            self.enter(FlowState::Abandoned);
            return self.finish(FlowOutcome::Abandoned);
        }

        let outcome = joined.unwrap_or_else(|e| {
            tracing::error!("download worker failed: {}", e);
            WorkOutcome::Failed(FailureKind::DownloadError)
        });

        match outcome {
            WorkOutcome::Image { file, bounds } => {
                self.enter(FlowState::Probing);
                self.share_file(&file, &bounds)
            }
            WorkOutcome::Failed(FailureKind::NotAnImage) => {
                self.enter(FlowState::Probing);
                self.fail(FailureKind::NotAnImage)
            }
            WorkOutcome::Failed(kind) => self.fail(kind),
        }
    }

    fn share_file(mut self, file: &Path, bounds: &ImageBounds) -> FlowReport {
        let content_type = self.settings.content_type_for(bounds).to_string();
        let dispatched = ShareRequest::for_file(file, &content_type)
            .and_then(|request| self.share.dispatch(&request).map(|()| request));
        match dispatched {
            Ok(request) => {
                tracing::info!(file = %file.display(), %content_type, "shared");
                self.enter(FlowState::Success);
                self.screen.close();
                self.finish(FlowOutcome::Shared(request))
            }
            Err(e) => {
                tracing::warn!("share handoff failed: {:#}", e);
                self.fail(FailureKind::DownloadError)
            }
        }
    }
}
