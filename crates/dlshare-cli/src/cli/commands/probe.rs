//! `dlshare probe <path>` – report image bounds of a local file.

use anyhow::Result;
use dlshare_core::notify::Notice;
use dlshare_core::probe;
use std::io::Write;
use std::path::Path;

/// Writes `WxH  media  path` to `out`, or the not-an-image notice to `err`.
/// Returns whether `path` is an image.
pub fn run_probe(path: &Path, out: &mut impl Write, err: &mut impl Write) -> Result<bool> {
    match probe::probe_bounds(path) {
        Some(b) => {
            let media = b.format.map(|f| f.media_type()).unwrap_or("image/*");
            writeln!(out, "{}x{}  {}  {}", b.width, b.height, media, path.display())?;
            Ok(true)
        }
        None => {
            writeln!(err, "{}: {}", path.display(), Notice::NotAnImage.message())?;
            Ok(false)
        }
    }
}
