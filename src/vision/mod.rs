//! Dichromatic, low-acuity vision filter.
//!
//! One declarative description (color matrix, channel gain, Gaussian blur) serves both
//! as an SVG `<filter>` for live media and as a CPU pass over decoded pixels.

pub mod blur;
pub mod matrix;

use image::RgbaImage;

use crate::{
    foundation::{
        error::{DogViewError, DogViewResult},
        math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    },
    model::SizeCategory,
};

pub use matrix::{ChannelGain, ColorMatrix};

/// Blur standard deviation (px) for small dogs; closer and lower means blurrier.
pub const SMALL_DOG_BLUR_SIGMA: f32 = 1.2;
/// Blur standard deviation (px) for everyone else.
pub const DEFAULT_BLUR_SIGMA: f32 = 0.6;

/// The complete filter for one acuity level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisionFilter {
    pub matrix: ColorMatrix,
    pub gain: ChannelGain,
    pub blur_sigma: f32,
}

impl VisionFilter {
    pub fn for_size(size: SizeCategory) -> Self {
        Self {
            matrix: ColorMatrix::DICHROMAT,
            gain: ChannelGain::YELLOW_LIFT,
            blur_sigma: blur_sigma_for(size),
        }
    }

    /// Color stages only, no blur.
    pub fn map_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        self.gain.apply(self.matrix.apply(px))
    }

    /// SVG filter element with the given id. Primitives run in sRGB so renderers agree
    /// with [`VisionFilter::apply`].
    pub fn to_svg_filter(&self, id: &str) -> String {
        format!(
            r#"<filter id="{id}" color-interpolation-filters="sRGB">
  <feColorMatrix type="matrix" values="{values}"/>
  <feComponentTransfer>
    <feFuncR type="linear" slope="{r}" intercept="0"/>
    <feFuncG type="linear" slope="{g}" intercept="0"/>
    <feFuncB type="linear" slope="{b}" intercept="0"/>
  </feComponentTransfer>
  <feGaussianBlur stdDeviation="{sigma}"/>
</filter>
"#,
            values = self.matrix.svg_values(),
            r = self.gain.r,
            g = self.gain.g,
            b = self.gain.b,
            sigma = self.blur_sigma,
        )
    }

    /// Filter a copy of `src`; the source is left untouched.
    #[tracing::instrument(skip(self, src), fields(w = src.width(), h = src.height(), sigma = self.blur_sigma))]
    pub fn apply(&self, src: &RgbaImage) -> DogViewResult<RgbaImage> {
        let (width, height) = src.dimensions();
        let mut buf = src.as_raw().clone();
        for px in buf.chunks_exact_mut(4) {
            let out = self.map_pixel([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }

        premultiply_rgba8_in_place(&mut buf);
        let mut blurred = blur::blur_rgba8_premul(&buf, width, height, self.blur_sigma)?;
        unpremultiply_rgba8_in_place(&mut blurred);

        RgbaImage::from_raw(width, height, blurred)
            .ok_or_else(|| DogViewError::render("filtered buffer size mismatch"))
    }
}

/// Acuity blur per size class.
pub fn blur_sigma_for(size: SizeCategory) -> f32 {
    match size {
        SizeCategory::Small => SMALL_DOG_BLUR_SIGMA,
        SizeCategory::Medium | SizeCategory::Large | SizeCategory::Unknown => DEFAULT_BLUR_SIGMA,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vision/filter.rs"]
mod tests;
