//! Image bounds probe.
//!
//! Reads only the header of a file to learn whether it is an image and how
//! big it is. Format detection is left entirely to `imagesize`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read for format sniffing; enough for every header `imagesize` recognizes.
const SNIFF_LEN: u64 = 1024;

/// Pixel dimensions of a probed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub width: usize,
    pub height: usize,
    /// Detected format, when it maps to a well-known media type.
    pub format: Option<ImageFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Ico,
}

impl ImageFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Ico => "image/x-icon",
        }
    }

    fn from_image_type(t: imagesize::ImageType) -> Option<Self> {
        use imagesize::ImageType;
        match t {
            ImageType::Jpeg => Some(ImageFormat::Jpeg),
            ImageType::Png => Some(ImageFormat::Png),
            ImageType::Gif => Some(ImageFormat::Gif),
            ImageType::Webp => Some(ImageFormat::Webp),
            ImageType::Bmp => Some(ImageFormat::Bmp),
            ImageType::Tiff => Some(ImageFormat::Tiff),
            ImageType::Ico => Some(ImageFormat::Ico),
            _ => None,
        }
    }
}

/// Probes `path` for image dimensions without decoding pixel data.
///
/// Returns `None` when the file cannot be read, the format is not recognized,
/// or the header reports a zero width or height.
pub fn probe_bounds(path: &Path) -> Option<ImageBounds> {
    let size = match imagesize::size(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(file = %path.display(), "no image bounds: {}", e);
            return None;
        }
    };
    tracing::debug!(width = size.width, height = size.height, "image bounds");
    if size.width == 0 || size.height == 0 {
        return None;
    }
    Some(ImageBounds {
        width: size.width,
        height: size.height,
        format: sniff_format(path),
    })
}

fn sniff_format(path: &Path) -> Option<ImageFormat> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)
        .and_then(|f| f.take(SNIFF_LEN).read_to_end(&mut header))
        .ok()?;
    imagesize::image_type(&header)
        .ok()
        .and_then(ImageFormat::from_image_type)
}
