//! `dlshare share <url>` – run the download-and-share flow.

use anyhow::Result;
use dlshare_core::config::DlshareConfig;
use dlshare_core::flow::{FlowController, FlowOutcome, FlowSettings};
use dlshare_core::notify::StderrNotifier;
use dlshare_core::screen::Screen;
use dlshare_core::share::{CommandShareTarget, PrintShareTarget, ShareTarget};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ShareArgs {
    pub url: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub print: bool,
}

fn share_target(cfg: &DlshareConfig, print: bool) -> Result<Box<dyn ShareTarget>> {
    match (&cfg.share.command, print) {
        (Some(argv), false) => Ok(Box::new(CommandShareTarget::new(argv)?)),
        _ => Ok(Box::new(PrintShareTarget::new(std::io::stdout()))),
    }
}

/// Runs the flow and returns how it ended.
pub async fn run_share(cfg: &DlshareConfig, args: ShareArgs) -> Result<FlowOutcome> {
    let download_dir = match args.download_dir {
        Some(dir) => dir,
        None => cfg.resolve_download_dir()?,
    };
    let settings = FlowSettings::from_config(cfg, &download_dir)?;
    let target = share_target(cfg, args.print)?;
    let notifier = StderrNotifier;
    let screen = Screen::new();

    // Ctrl-C tears the screen down: the download is aborted and its result dropped.
    let on_interrupt = screen.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.destroy();
        }
    });

    let report = FlowController::new(settings, target.as_ref(), &notifier, screen)
        .run(args.url.as_deref())
        .await;
    interrupt.abort();
    tracing::debug!(states = ?report.states, "flow finished");

    Ok(report.outcome)
}
