use clap::Parser;
use dlshare_core::logging;
use std::process::ExitCode;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log next to an explicit --config (or $DLSHARE_LOG_FILE); stderr if unusable.
    let logged = logging::log_file_path(cli.config.as_deref())
        .and_then(|path| logging::init_logging(&path));
    if logged.is_err() {
        logging::init_logging_stderr();
    }

    match cli.run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("dlshare error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
