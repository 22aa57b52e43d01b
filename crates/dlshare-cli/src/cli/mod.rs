//! CLI for dlshare.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use dlshare_core::config::{self, DlshareConfig};
use dlshare_core::flow::FlowOutcome;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_name, run_probe, run_share, ShareArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dlshare")]
#[command(about = "Download a shared URL, check it is an image, and hand it off", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/dlshare/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the URL, verify it is an image, and share it.
    Share {
        /// Shared text; must be an http(s) URL.
        url: Option<String>,

        /// Directory to download into (default: config, then the Downloads directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,

        /// Print the share request as JSON instead of running the configured command.
        #[arg(long)]
        print: bool,
    },

    /// Print the pixel size of a local image file.
    Probe {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print the file name a URL would be downloaded to.
    Name {
        url: String,
    },
}

fn load_config(path: Option<&std::path::Path>) -> Result<DlshareConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let cfg = load_config(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Share {
                url,
                download_dir,
                print,
            } => {
                let args = ShareArgs {
                    url,
                    download_dir,
                    print,
                };
                let outcome = run_share(&cfg, args).await?;
                Ok(exit_code(matches!(outcome, FlowOutcome::Shared(_))))
            }
            CliCommand::Probe { path } => {
                let found = run_probe(&path, &mut io::stdout().lock(), &mut io::stderr().lock())?;
                Ok(exit_code(found))
            }
            CliCommand::Name { url } => {
                run_name(&cfg, &url, &mut io::stdout().lock())?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[cfg(test)]
mod tests;
