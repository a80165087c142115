use std::path::Path;

use image::RgbaImage;

use crate::foundation::error::{DogViewError, DogViewResult};

/// Latest point a representative frame is taken from, in seconds.
pub const MAX_SEEK_SEC: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoProbe {
    pub width: u32,
    pub height: u32,
    pub duration_sec: f64,
}

/// Seek position for the representative frame: early, but past any black lead-in.
pub fn representative_time(duration_sec: f64) -> f64 {
    if !duration_sec.is_finite() || duration_sec <= 0.0 {
        return 0.0;
    }
    MAX_SEEK_SEC.min(duration_sec * 0.1)
}

#[cfg(feature = "media-ffmpeg")]
pub fn probe_video(source_path: &Path) -> DogViewResult<VideoProbe> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| DogViewError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(DogViewError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| DogViewError::media(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| DogViewError::media("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| DogViewError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| DogViewError::media("missing video height from ffprobe"))?;
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(VideoProbe {
        width,
        height,
        duration_sec,
    })
}

/// Decode one frame at `time_sec` as a PNG. The size is read from the PNG itself, since
/// ffmpeg autorotation can swap the coded width and height.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_frame(source_path: &Path, time_sec: f64) -> DogViewResult<RgbaImage> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &format!("{time_sec:.6}")])
        .arg("-i")
        .arg(source_path)
        .args([
            "-frames:v",
            "1",
            "-f",
            "image2pipe",
            "-c:v",
            "png",
            "pipe:1",
        ])
        .output()
        .map_err(|e| DogViewError::media(format!("failed to run ffmpeg: {e}")))?;

    if !out.status.success() {
        return Err(DogViewError::media(format!(
            "ffmpeg frame decode failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    frame_from_png(&out.stdout)
}

pub fn frame_from_png(bytes: &[u8]) -> DogViewResult<RgbaImage> {
    if bytes.is_empty() {
        return Err(DogViewError::media("ffmpeg produced no frame"));
    }
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| DogViewError::media(format!("decoded video frame is not a png: {e}")))?;
    Ok(img.to_rgba8())
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_video(_source_path: &Path) -> DogViewResult<VideoProbe> {
    Err(DogViewError::media(
        "video assets require the 'media-ffmpeg' feature",
    ))
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_frame(_source_path: &Path, _time_sec: f64) -> DogViewResult<RgbaImage> {
    Err(DogViewError::media(
        "video assets require the 'media-ffmpeg' feature",
    ))
}

/// Probe the video and decode its representative frame.
#[tracing::instrument]
pub fn representative_frame(source_path: &Path) -> DogViewResult<RgbaImage> {
    let probe = probe_video(source_path)?;
    let t = representative_time(probe.duration_sec);
    tracing::debug!(t, width = probe.width, height = probe.height, "seeking video frame");
    let frame = decode_frame(source_path, t)?;
    if frame.dimensions() != (probe.width, probe.height) {
        tracing::debug!(w = frame.width(), h = frame.height(), "frame was rotated on decode");
    }
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/media/ffmpeg.rs"]
mod tests;
