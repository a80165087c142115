use std::fmt::{self, Write as _};

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    foundation::{
        core::Canvas,
        error::{DogViewError, DogViewResult},
        math::unpremultiply_rgba8_in_place,
    },
    overlay::draw::{DrawOp, FeetComposition, FilterRef, GradientRef, LegGroup, Paint, Shape},
};

/// Logical size of the overlay document.
pub const VIEW_BOX_WIDTH: f64 = 400.0;
pub const VIEW_BOX_HEIGHT: f64 = 200.0;

/// Displays a [`FeetComposition`] as a standalone SVG document.
pub struct FeetSvg<'a>(pub &'a FeetComposition);

impl fmt::Display for FeetSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEW_BOX_WIDTH} {VIEW_BOX_HEIGHT}" width="{VIEW_BOX_WIDTH}" height="{VIEW_BOX_HEIGHT}">"#
        )?;
        write_defs(f, self.0)?;
        for leg in &self.0.legs {
            write_leg(f, leg)?;
        }
        f.write_str("</svg>\n")
    }
}

fn write_defs(f: &mut fmt::Formatter<'_>, feet: &FeetComposition) -> fmt::Result {
    f.write_str("  <defs>\n")?;
    if feet.uses_gradient(GradientRef::LeatherShine) {
        write_leather_shine(f)?;
    }
    if feet.uses_gradient(GradientRef::SkinShade) {
        write_skin_shade(f)?;
    }
    if feet.uses_filter(FilterRef::SoftShadow) {
        write_soft_shadow(f)?;
    }
    f.write_str("  </defs>\n")
}

fn write_leather_shine(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        r##"    <linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="#ffffff" stop-opacity="0.5"/>
      <stop offset="40%" stop-color="#ffffff" stop-opacity="0.1"/>
      <stop offset="100%" stop-color="#000000" stop-opacity="0"/>
    </linearGradient>"##,
        GradientRef::LeatherShine.id()
    )
}

fn write_skin_shade(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        r##"    <linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" stop-color="#000000" stop-opacity="0.1"/>
      <stop offset="50%" stop-color="#000000" stop-opacity="0"/>
      <stop offset="100%" stop-color="#000000" stop-opacity="0.1"/>
    </linearGradient>"##,
        GradientRef::SkinShade.id()
    )
}

fn write_soft_shadow(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        r#"    <filter id="{}" x="-20%" y="-20%" width="150%" height="150%">
      <feGaussianBlur in="SourceAlpha" stdDeviation="3"/>
      <feOffset dx="2" dy="3" result="offsetblur"/>
      <feComponentTransfer>
        <feFuncA type="linear" slope="0.3"/>
      </feComponentTransfer>
      <feMerge>
        <feMergeNode in="offsetblur"/>
        <feMergeNode in="SourceGraphic"/>
      </feMerge>
    </filter>"#,
        FilterRef::SoftShadow.id()
    )
}

fn write_leg(f: &mut fmt::Formatter<'_>, leg: &LegGroup) -> fmt::Result {
    let [a, b, c, d, e, g] = leg.transform.as_coeffs();
    writeln!(f, r#"  <g transform="matrix({a} {b} {c} {d} {e} {g})">"#)?;
    for op in &leg.ops {
        write_op(f, op)?;
    }
    f.write_str("  </g>\n")
}

fn write_op(f: &mut fmt::Formatter<'_>, op: &DrawOp) -> fmt::Result {
    match &op.shape {
        Shape::Path(path) => write!(f, r#"    <path d="{}""#, path.to_svg())?,
        Shape::Ellipse { center, radii } => write!(
            f,
            r#"    <ellipse cx="{}" cy="{}" rx="{}" ry="{}""#,
            center.x, center.y, radii.x, radii.y
        )?,
    }

    match op.fill {
        Some(Paint::Solid(color)) => {
            write!(f, r#" fill="{}""#, color.svg_hex())?;
            if !color.is_opaque() {
                write!(f, r#" fill-opacity="{}""#, color.opacity())?;
            }
        }
        Some(Paint::Gradient(g)) => write!(f, r#" fill="url(#{})""#, g.id())?,
        None => f.write_str(r#" fill="none""#)?,
    }

    if let Some(stroke) = op.stroke {
        write!(
            f,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color.svg_hex(),
            stroke.width
        )?;
        if stroke.round_cap {
            f.write_str(r#" stroke-linecap="round""#)?;
        }
    }

    if op.opacity != 1.0 {
        write!(f, r#" opacity="{}""#, op.opacity)?;
    }
    if let Some(filter) = op.filter {
        write!(f, r#" filter="url(#{})""#, filter.id())?;
    }
    f.write_str("/>\n")
}

/// Serialize the composition to SVG text.
pub fn to_svg_document(feet: &FeetComposition) -> String {
    let mut out = String::with_capacity(8 * 1024);
    // Writing into a String cannot fail.
    let _ = write!(out, "{}", FeetSvg(feet));
    out
}

/// Parse an overlay document and rasterize it to straight-alpha RGBA at `width x height`.
#[tracing::instrument(skip(svg))]
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> DogViewResult<RgbaImage> {
    let canvas = Canvas::new(width, height)?;
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse overlay svg tree")?;

    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(DogViewError::render("overlay svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| DogViewError::render("failed to allocate overlay pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| DogViewError::render("overlay pixmap size mismatch"))
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/svg.rs"]
mod tests;
