//! Final dog-view frame: background media, vision filter, ground-level zoom, vignette
//! and the owner's feet, in that order.

use image::{RgbaImage, imageops::FilterType};

use crate::{
    config::RenderSettings,
    foundation::{
        color::Color,
        core::{Canvas, Rect},
        error::{DogViewError, DogViewResult},
        math::clamp_u8,
    },
    model::SizeCategory,
    overlay::{self, VIEW_BOX_HEIGHT, VIEW_BOX_WIDTH},
    perspective::{ScaleTransition, ViewTransform},
    scene::AssetBundle,
    vision::VisionFilter,
};

/// Layout of the feet overlay relative to a reference stage width.
const STAGE_WIDTH: f64 = 896.0;
const FEET_WIDTH: f64 = 280.0;
const FEET_RIGHT_INSET: f64 = 0.05;
/// How far the feet hang below the bottom edge, in stage pixels.
const FEET_DROP: f64 = 20.0;

const VIGNETTE_COLOR: Color = Color::hex(0x3e2723);
const VIGNETTE_INNER: f64 = 0.6;
/// Gradient edge alpha times layer opacity.
const VIGNETTE_STRENGTH: f64 = 0.4 * 0.4;

/// How the source media is fitted to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fit {
    /// Fill the canvas, cropping the overflow.
    Cover,
    /// Show the whole source, letterboxed on black.
    Contain,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComposeOptions {
    pub canvas: Canvas,
    pub fit: Fit,
    /// `None` renders the unfiltered human view.
    pub filter: Option<VisionFilter>,
    pub view: ViewTransform,
    pub overlay_view: ViewTransform,
    pub vignette: bool,
    pub feet: Option<AssetBundle>,
}

impl ComposeOptions {
    /// Dog view for a size class: filtered, zoomed, vignetted, no feet.
    pub fn dog_view(canvas: Canvas, size: SizeCategory) -> Self {
        Self {
            canvas,
            fit: Fit::Cover,
            filter: Some(VisionFilter::for_size(size)),
            view: ViewTransform::for_size(size),
            overlay_view: ViewTransform::overlay_for_size(size),
            vignette: true,
            feet: None,
        }
    }

    /// The plain media, letterboxed, with nothing layered on top.
    pub fn human_view(canvas: Canvas) -> Self {
        Self {
            canvas,
            fit: Fit::Contain,
            filter: None,
            view: ViewTransform::IDENTITY,
            overlay_view: ViewTransform::overlay_for_size(SizeCategory::Unknown),
            vignette: false,
            feet: None,
        }
    }

    /// `human_view` wins over the feet and vignette toggles.
    pub fn from_settings(
        settings: &RenderSettings,
        size: SizeCategory,
        bundle: AssetBundle,
    ) -> DogViewResult<Self> {
        let canvas = settings.canvas()?;
        if settings.human_view {
            return Ok(Self::human_view(canvas));
        }
        let mut opts = Self::dog_view(canvas, size);
        opts.vignette = settings.vignette;
        opts.feet = settings.show_feet.then(|| match settings.skin_tone {
            Some(skin) => bundle.with_skin_tone(skin),
            None => bundle,
        });
        Ok(opts)
    }
}

/// Scale to cover `canvas` and center-crop, like `object-fit: cover`.
pub fn cover_fit(src: &RgbaImage, canvas: Canvas) -> DogViewResult<RgbaImage> {
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 {
        return Err(DogViewError::media("source image is empty"));
    }
    let (cw, ch) = (canvas.width, canvas.height);
    let k = (f64::from(cw) / f64::from(sw)).max(f64::from(ch) / f64::from(sh));
    let rw = ((f64::from(sw) * k).ceil() as u32).max(cw);
    let rh = ((f64::from(sh) * k).ceil() as u32).max(ch);

    let resized = if (rw, rh) == (sw, sh) {
        src.clone()
    } else {
        image::imageops::resize(src, rw, rh, FilterType::Triangle)
    };
    let x = (rw - cw) / 2;
    let y = (rh - ch) / 2;
    Ok(image::imageops::crop_imm(&resized, x, y, cw, ch).to_image())
}

/// Scale to fit inside `canvas` and center on black, like `object-fit: contain`.
pub fn contain_fit(src: &RgbaImage, canvas: Canvas) -> DogViewResult<RgbaImage> {
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 {
        return Err(DogViewError::media("source image is empty"));
    }
    let (cw, ch) = (canvas.width, canvas.height);
    let k = (f64::from(cw) / f64::from(sw)).min(f64::from(ch) / f64::from(sh));
    let rw = ((f64::from(sw) * k).round() as u32).clamp(1, cw);
    let rh = ((f64::from(sh) * k).round() as u32).clamp(1, ch);

    let resized = if (rw, rh) == (sw, sh) {
        src.clone()
    } else {
        image::imageops::resize(src, rw, rh, FilterType::Triangle)
    };
    let mut out = RgbaImage::from_pixel(cw, ch, image::Rgba([0, 0, 0, 255]));
    image::imageops::overlay(
        &mut out,
        &resized,
        i64::from((cw - rw) / 2),
        i64::from((ch - rh) / 2),
    );
    Ok(out)
}

/// Magnify the visible region of `img` back to full canvas size.
pub fn apply_zoom(img: &RgbaImage, view: ViewTransform, canvas: Canvas) -> RgbaImage {
    if view.is_identity() || view.scale < 1.0 {
        return img.clone();
    }
    let r = view.visible_rect(canvas).intersect(canvas.rect());
    let (x, y, w, h) = pixel_box(r);
    let crop = image::imageops::crop_imm(img, x, y, w, h).to_image();
    image::imageops::resize(&crop, canvas.width, canvas.height, FilterType::Triangle)
}

fn pixel_box(r: Rect) -> (u32, u32, u32, u32) {
    let x0 = r.x0.floor().max(0.0) as u32;
    let y0 = r.y0.floor().max(0.0) as u32;
    let x1 = r.x1.ceil().max(0.0) as u32;
    let y1 = r.y1.ceil().max(0.0) as u32;
    (x0, y0, (x1 - x0).max(1), (y1 - y0).max(1))
}

/// Darken the corners with a multiply-blended radial gradient.
pub fn apply_vignette(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;
    let far = cx.hypot(cy);
    if far <= 0.0 {
        return;
    }
    let tint = [VIGNETTE_COLOR.r, VIGNETTE_COLOR.g, VIGNETTE_COLOR.b].map(|c| f64::from(c) / 255.0);

    for (x, y, px) in img.enumerate_pixels_mut() {
        let d = (f64::from(x) + 0.5 - cx).hypot(f64::from(y) + 0.5 - cy) / far;
        let t = ((d - VIGNETTE_INNER) / (1.0 - VIGNETTE_INNER)).clamp(0.0, 1.0);
        if t == 0.0 {
            continue;
        }
        let a = VIGNETTE_STRENGTH * t;
        for (c, k) in px.0[..3].iter_mut().zip(tint) {
            *c = clamp_u8((f64::from(*c) * (1.0 - a * (1.0 - k))) as f32);
        }
    }
}

/// Pixel box of the feet overlay: anchored bottom-right, hanging slightly off the
/// bottom edge, scaled about its own bottom-right corner.
pub fn feet_box(canvas: Canvas, overlay_view: ViewTransform) -> Rect {
    let unit = f64::from(canvas.width) / STAGE_WIDTH;
    let w = FEET_WIDTH * unit;
    let h = w * VIEW_BOX_HEIGHT / VIEW_BOX_WIDTH;
    let right = f64::from(canvas.width) * (1.0 - FEET_RIGHT_INSET);
    let bottom = f64::from(canvas.height) + FEET_DROP * unit;
    let base = Rect::new(right - w, bottom - h, right, bottom);

    let pivot = overlay_view.anchor.point_in(base);
    let s = overlay_view.scale;
    Rect::new(
        pivot.x + (base.x0 - pivot.x) * s,
        pivot.y + (base.y0 - pivot.y) * s,
        pivot.x + (base.x1 - pivot.x) * s,
        pivot.y + (base.y1 - pivot.y) * s,
    )
}

pub fn draw_feet(
    img: &mut RgbaImage,
    bundle: &AssetBundle,
    canvas: Canvas,
    overlay_view: ViewTransform,
) -> DogViewResult<()> {
    let r = feet_box(canvas, overlay_view);
    let w = r.width().round().max(1.0) as u32;
    let h = r.height().round().max(1.0) as u32;
    let feet = overlay::render_overlay(bundle, w, h)?;
    image::imageops::overlay(img, &feet, r.x0.round() as i64, r.y0.round() as i64);
    Ok(())
}

/// Fit and filter once; the zoom and overlays are layered on by [`finish`].
pub fn prepare_base(src: &RgbaImage, opts: &ComposeOptions) -> DogViewResult<RgbaImage> {
    let fitted = match opts.fit {
        Fit::Cover => cover_fit(src, opts.canvas)?,
        Fit::Contain => contain_fit(src, opts.canvas)?,
    };
    match &opts.filter {
        Some(filter) => filter.apply(&fitted),
        None => Ok(fitted),
    }
}

pub fn finish(base: &RgbaImage, opts: &ComposeOptions) -> DogViewResult<RgbaImage> {
    let mut out = apply_zoom(base, opts.view, opts.canvas);
    if opts.vignette {
        apply_vignette(&mut out);
    }
    if let Some(bundle) = &opts.feet {
        draw_feet(&mut out, bundle, opts.canvas, opts.overlay_view)?;
    }
    Ok(out)
}

/// Render one dog-view frame from a decoded still.
#[tracing::instrument(skip_all, fields(w = opts.canvas.width, h = opts.canvas.height, scale = opts.view.scale, filtered = opts.filter.is_some()))]
pub fn compose_dog_view(src: &RgbaImage, opts: &ComposeOptions) -> DogViewResult<RgbaImage> {
    let base = prepare_base(src, opts)?;
    finish(&base, opts)
}

/// Frames of a perspective change. The filter is that of `opts`; zoom and feet scale
/// follow the two transitions.
#[tracing::instrument(skip_all, fields(frames = frames))]
pub fn compose_transition(
    src: &RgbaImage,
    opts: &ComposeOptions,
    media: &ScaleTransition,
    feet: &ScaleTransition,
    frames: u32,
) -> DogViewResult<Vec<RgbaImage>> {
    let base = prepare_base(src, opts)?;
    media
        .frames(frames)
        .into_iter()
        .zip(feet.frames(frames))
        .map(|(view, overlay_view)| {
            let frame_opts = ComposeOptions {
                view,
                overlay_view,
                ..opts.clone()
            };
            finish(&base, &frame_opts)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
