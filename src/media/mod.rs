//! Local media intake and the still frames derived from it.

pub mod ffmpeg;
pub mod sample;

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{DogViewError, DogViewResult};

pub use sample::{VisualSample, build_visual_sample};

/// Container extensions handled as video, with their MIME types.
const VIDEO_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    ("m4v", "video/x-m4v"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A media file the user picked. Only the locator is held; bytes are read on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaAsset {
    pub locator: PathBuf,
    pub kind: MediaKind,
    pub display_name: String,
    pub mime: String,
}

impl MediaAsset {
    /// Classify a path by extension. The file itself is not opened.
    pub fn from_path(path: impl AsRef<Path>) -> DogViewResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                DogViewError::media(format!("'{}' has no file extension", path.display()))
            })?;

        let (kind, mime) = if let Some((_, mime)) = VIDEO_TYPES.iter().find(|(e, _)| *e == ext) {
            (MediaKind::Video, (*mime).to_owned())
        } else if let Some(format) = image::ImageFormat::from_extension(&ext) {
            (MediaKind::Image, format.to_mime_type().to_owned())
        } else {
            return Err(DogViewError::media(format!(
                "unsupported media type '.{ext}' for '{}'",
                path.display()
            )));
        };

        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            locator: path.to_path_buf(),
            kind,
            display_name,
            mime,
        })
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Full-resolution still used as the compositor background. Videos contribute the same
/// representative frame that is sent to the caption model.
#[tracing::instrument(skip(asset), fields(name = %asset.display_name))]
pub fn load_display_image(asset: &MediaAsset) -> DogViewResult<RgbaImage> {
    match asset.kind {
        MediaKind::Image => {
            let img = image::open(&asset.locator)
                .with_context(|| format!("decode image '{}'", asset.locator.display()))?;
            Ok(img.to_rgba8())
        }
        MediaKind::Video => ffmpeg::representative_frame(&asset.locator),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/asset.rs"]
mod tests;
