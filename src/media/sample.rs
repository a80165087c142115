use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, RgbaImage, codecs::jpeg::JpegEncoder, imageops::FilterType};

use crate::{
    foundation::error::{DogViewError, DogViewResult},
    media::{MediaAsset, load_display_image},
};

/// Longest edge of a sample sent to the caption model.
pub const MAX_SAMPLE_EDGE: u32 = 640;
pub const JPEG_QUALITY: u8 = 70;

/// A compact still of the current media, ready to inline into a model request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualSample {
    pub mime: String,
    /// Base64 (standard alphabet, padded) JPEG bytes.
    pub data: String,
    pub width: u32,
    pub height: u32,
}

/// Target dimensions with the long edge capped at `max_edge`, aspect preserved.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let long = width.max(height);
    if long <= max_edge || long == 0 {
        return (width, height);
    }
    let k = f64::from(max_edge) / f64::from(long);
    let w = (f64::from(width) * k).round().max(1.0) as u32;
    let h = (f64::from(height) * k).round().max(1.0) as u32;
    (w.min(max_edge), h.min(max_edge))
}

/// Downscale and JPEG-encode a decoded still.
pub fn sample_from_image(img: &RgbaImage) -> DogViewResult<VisualSample> {
    let (w, h) = fit_within(img.width(), img.height(), MAX_SAMPLE_EDGE);
    let scaled = if (w, h) == img.dimensions() {
        img.clone()
    } else {
        image::imageops::resize(img, w, h, FilterType::Triangle)
    };
    let rgb = DynamicImage::ImageRgba8(scaled).to_rgb8();

    let mut jpeg = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| DogViewError::media(format!("jpeg encode failed: {e}")))?;

    Ok(VisualSample {
        mime: "image/jpeg".to_owned(),
        data: general_purpose::STANDARD.encode(jpeg.into_inner()),
        width: w,
        height: h,
    })
}

/// Representative sample for any media kind. Blocking; run it off the async executor.
#[tracing::instrument(skip(asset), fields(name = %asset.display_name, kind = ?asset.kind))]
pub fn build_visual_sample(asset: &MediaAsset) -> DogViewResult<VisualSample> {
    let still = load_display_image(asset)?;
    sample_from_image(&still)
}

#[cfg(test)]
#[path = "../../tests/unit/media/sample.rs"]
mod tests;
