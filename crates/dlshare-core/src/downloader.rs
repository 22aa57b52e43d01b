//! Blocking single-stream HTTP GET into a local file.
//!
//! One GET per hop, no Range, no retry, no resume. Redirects stay on
//! http/https. The body replaces whatever was at the destination path. Runs in the current thread; call from
//! `spawn_blocking` if used from async code.

use std::cell::Cell;
use std::fmt;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Transport settings for a single download.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Upper bound for the whole transfer.
    pub timeout: Duration,
    /// Abort when below this many bytes/sec for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Optional cap on the response body. None = unbounded.
    pub max_body_bytes: Option<u64>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(300),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            max_body_bytes: None,
        }
    }
}

/// Why a download failed. Every variant ends the flow with the download-error notice.
#[derive(Debug)]
pub enum DownloadError {
    /// Curl reported an error (timeout, connection, DNS, TLS, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Creating or writing the destination file failed.
    Storage(std::io::Error),
    /// The body grew past `FetchOptions::max_body_bytes`.
    TooLarge { limit: u64 },
    /// The abort token was set while the transfer was running.
    Aborted,
    /// A redirect pointed at a non-HTTP location.
    Redirect(String),
    /// More than `MAX_REDIRECTS` redirects.
    TooManyRedirects,
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Curl(e) => write!(f, "{}", e),
            DownloadError::Http(code) => write!(f, "HTTP {}", code),
            DownloadError::Storage(e) => write!(f, "storage: {}", e),
            DownloadError::TooLarge { limit } => {
                write!(f, "response body exceeds {} bytes", limit)
            }
            DownloadError::Aborted => write!(f, "download aborted"),
            DownloadError::Redirect(location) => {
                write!(f, "refusing redirect to {}", location)
            }
            DownloadError::TooManyRedirects => {
                write!(f, "more than {} redirects", MAX_REDIRECTS)
            }
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Curl(e) => Some(e),
            DownloadError::Storage(e) => Some(e),
            DownloadError::Http(_)
            | DownloadError::TooLarge { .. }
            | DownloadError::Aborted
            | DownloadError::Redirect(_)
            | DownloadError::TooManyRedirects => None,
        }
    }
}

impl From<curl::Error> for DownloadError {
    fn from(e: curl::Error) -> Self {
        DownloadError::Curl(e)
    }
}

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: u32 = 10;

/// Reason the write callback stopped the transfer early.
enum Stop {
    Storage(std::io::Error),
    TooLarge(u64),
    Aborted,
}

/// Result of one request.
enum Hop {
    Done(u64),
    Redirect(String),
}

fn is_http_url(location: &str) -> bool {
    Url::parse(location).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Downloads `url` with a single GET into `dest`, truncating any existing file.
/// Returns the number of body bytes written.
///
/// Redirects are followed by hand, at most `MAX_REDIRECTS` of them, and only to
/// `http`/`https`; a hop to any other scheme fails before it is contacted.
/// On failure the destination is left as the write left it; nothing is cleaned up.
pub fn download_to_file(
    url: &str,
    dest: &Path,
    opts: &FetchOptions,
    abort: Option<&Arc<AtomicBool>>,
) -> Result<u64, DownloadError> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .map_err(DownloadError::Storage)?;

    let mut current = url.to_string();
    for _ in 0..=MAX_REDIRECTS {
        match fetch_once(&current, &mut file, opts, abort)? {
            Hop::Done(total) => {
                file.flush().map_err(DownloadError::Storage)?;
                tracing::debug!(url, bytes = total, dest = %dest.display(), "download complete");
                return Ok(total);
            }
            Hop::Redirect(next) => {
                if !is_http_url(&next) {
                    return Err(DownloadError::Redirect(next));
                }
                tracing::debug!(from = %current, to = %next, "following redirect");
                // Drop the redirect response body.
                file.set_len(0).map_err(DownloadError::Storage)?;
                file.rewind().map_err(DownloadError::Storage)?;
                current = next;
            }
        }
    }
    Err(DownloadError::TooManyRedirects)
}

/// One GET of `url`, body appended to `file`. 3xx with a Location is a `Hop::Redirect`.
fn fetch_once(
    url: &str,
    file: &mut File,
    opts: &FetchOptions,
    abort: Option<&Arc<AtomicBool>>,
) -> Result<Hop, DownloadError> {
    let written = Cell::new(0u64);
    let stop: Cell<Option<Stop>> = Cell::new(None);
    let aborted = || abort.is_some_and(|a| a.load(Ordering::Relaxed));

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(false)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    easy.timeout(opts.timeout)?;
    // Progress callbacks let an abort land while the server is silent.
    easy.progress(true)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if aborted() {
                stop.set(Some(Stop::Aborted));
                return Ok(0);
            }
            let total = written.get() + data.len() as u64;
            if let Some(limit) = opts.max_body_bytes {
                if total > limit {
                    stop.set(Some(Stop::TooLarge(limit)));
                    return Ok(0);
                }
            }
            if let Err(e) = file.write_all(data) {
                stop.set(Some(Stop::Storage(e)));
                return Ok(0);
            }
            written.set(total);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| {
            if aborted() {
                stop.set(Some(Stop::Aborted));
                return false;
            }
            true
        })?;
        transfer.perform()
    };

    if let Some(reason) = stop.take() {
        return Err(match reason {
            Stop::Storage(e) => DownloadError::Storage(e),
            Stop::TooLarge(limit) => DownloadError::TooLarge { limit },
            Stop::Aborted => DownloadError::Aborted,
        });
    }
    performed?;

    let code = easy.response_code()?;
    if (300..400).contains(&code) {
        if let Some(next) = easy.redirect_url()? {
            return Ok(Hop::Redirect(next.to_string()));
        }
    }
    if !(200..300).contains(&code) {
        return Err(DownloadError::Http(code));
    }
    Ok(Hop::Done(written.get()))
}
