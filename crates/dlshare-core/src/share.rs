//! Share handoff: the request handed to whatever consumes the downloaded image.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use url::Url;

/// A request to share one local file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    pub file: PathBuf,
    /// `file://` URI of `file`.
    pub uri: String,
    /// Declared media type. Receivers should filter on `image/*`, not trust the subtype.
    pub content_type: String,
    /// The receiver is granted read access to `uri`.
    pub grant_read: bool,
}

impl ShareRequest {
    /// Builds a request for `file`, which must be absolute.
    pub fn for_file(file: &Path, content_type: &str) -> Result<Self> {
        let uri = Url::from_file_path(file)
            .map_err(|()| anyhow::anyhow!("not an absolute path: {}", file.display()))?;
        Ok(Self {
            file: file.to_path_buf(),
            uri: uri.to_string(),
            content_type: content_type.to_string(),
            grant_read: true,
        })
    }
}

/// Something that can receive a share request (the chooser).
pub trait ShareTarget {
    fn dispatch(&self, request: &ShareRequest) -> Result<()>;
}

/// Prints the request as one JSON line to a writer (stdout in the CLI).
pub struct PrintShareTarget<W> {
    out: std::sync::Mutex<W>,
}

impl<W: Write> PrintShareTarget<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: std::sync::Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write> ShareTarget for PrintShareTarget<W> {
    fn dispatch(&self, request: &ShareRequest) -> Result<()> {
        let line = serde_json::to_string(request)?;
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", line).context("write share request")?;
        out.flush()?;
        Ok(())
    }
}

/// Runs a program with the file, e.g. `["xdg-open", "{path}"]`.
///
/// Placeholders in arguments: `{path}`, `{uri}`, `{mime}`. The program is
/// spawned and not waited on, like a chooser taking over.
#[derive(Debug, Clone)]
pub struct CommandShareTarget {
    program: String,
    args: Vec<String>,
}

impl CommandShareTarget {
    pub fn new(argv: &[String]) -> Result<Self> {
        let (program, args) = match argv.split_first() {
            Some((p, rest)) if !p.is_empty() => (p.clone(), rest.to_vec()),
            _ => bail!("share command is empty"),
        };
        Ok(Self { program, args })
    }

    /// Arguments with placeholders filled in for `request`.
    pub fn expand_args(&self, request: &ShareRequest) -> Vec<String> {
        let path = request.file.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace("{path}", &path)
                    .replace("{uri}", &request.uri)
                    .replace("{mime}", &request.content_type)
            })
            .collect()
    }
}

impl ShareTarget for CommandShareTarget {
    fn dispatch(&self, request: &ShareRequest) -> Result<()> {
        let args = self.expand_args(request);
        tracing::info!(program = %self.program, ?args, "dispatching share");
        Command::new(&self.program)
            .args(&args)
            .spawn()
            .with_context(|| format!("spawn share command {}", self.program))?;
        Ok(())
    }
}
