//! Procedural "owner feet" overlay: a cartoon pair of legs seen from dog height.
//!
//! Geometry is produced as a declarative [`draw::DrawOp`] list per leg, serialized to
//! SVG, and rasterized with resvg for compositing.

pub mod draw;
pub mod limb;
pub mod svg;

use image::RgbaImage;

use crate::{foundation::error::DogViewResult, scene::AssetBundle};

pub use draw::{DrawOp, FeetComposition, Layer};
pub use limb::compose_feet;
pub use svg::{VIEW_BOX_HEIGHT, VIEW_BOX_WIDTH, to_svg_document};

/// SVG document for the overlay of one outfit.
pub fn render_overlay_svg(bundle: &AssetBundle) -> String {
    to_svg_document(&compose_feet(bundle))
}

/// Rasterized overlay at the requested pixel size.
pub fn render_overlay(bundle: &AssetBundle, width: u32, height: u32) -> DogViewResult<RgbaImage> {
    svg::rasterize_svg(&render_overlay_svg(bundle), width, height)
}
