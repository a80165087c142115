//! Leg, sock, pant and shoe primitives.
//!
//! All coordinates are in a leg-local space whose origin sits near the ankle pivot;
//! y grows downward, as in SVG.

use crate::{
    foundation::{
        color::Color,
        core::{Affine, BezPath, Point, Vec2},
    },
    overlay::draw::{
        DrawOp, FeetComposition, FilterRef, GradientRef, Layer, LegGroup, Paint, Stroke, polygon,
        polyline,
    },
    scene::{AssetBundle, FootwearKind, PantLength, SockHeight, TextureTag},
};

const LEG_WIDTH: f64 = 36.0;

/// Left and right leg placement in the 400x200 overlay.
pub const LEFT_LEG: (f64, f64, f64) = (120.0, 80.0, -5.0);
pub const RIGHT_LEG: (f64, f64, f64) = (240.0, 90.0, 8.0);

fn placement((x, y, deg): (f64, f64, f64)) -> Affine {
    Affine::translate((x, y)) * Affine::rotate(deg.to_radians())
}

/// Tapered skin quad from hip to ankle with cylindrical shading on top.
pub fn leg(skin: Color) -> Vec<DrawOp> {
    let half = LEG_WIDTH / 2.0;
    let quad = polygon(&[
        (-half, -120.0),
        (half, -120.0),
        (half - 2.0, 50.0),
        (-half - 2.0, 50.0),
    ]);
    vec![
        DrawOp::solid(Layer::Leg, quad.clone(), skin).translated(0.0, -20.0),
        DrawOp::fill(Layer::Leg, quad, Paint::Gradient(GradientRef::SkinShade))
            .translated(0.0, -20.0),
    ]
}

pub fn sock(color: Color, height: SockHeight) -> Vec<DrawOp> {
    let body = match height {
        SockHeight::None => return Vec::new(),
        SockHeight::Low => polygon(&[(-16.0, 40.0), (16.0, 40.0), (18.0, 65.0), (-18.0, 65.0)]),
        SockHeight::Frilly => {
            polygon(&[(-17.0, 30.0), (17.0, 30.0), (19.0, 65.0), (-19.0, 65.0)])
        }
        SockHeight::Mid => polygon(&[(-17.0, 10.0), (17.0, 10.0), (19.0, 65.0), (-19.0, 65.0)]),
    };

    let mut ops = vec![DrawOp::solid(Layer::Sock, body.clone(), color)];
    if height == SockHeight::Frilly {
        ops.push(DrawOp::stroke(
            Layer::Sock,
            ruffle(),
            Stroke {
                color,
                width: 3.0,
                round_cap: false,
            },
        ));
    }
    // Ribbing.
    ops.push(
        DrawOp::fill(Layer::Sock, body, Paint::Gradient(GradientRef::SkinShade)).with_opacity(0.1),
    );
    ops
}

fn ruffle() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((-17.0, 30.0));
    p.quad_to((-12.0, 25.0), (-7.0, 30.0));
    p.quad_to((-2.0, 25.0), (3.0, 30.0));
    p.quad_to((8.0, 25.0), (13.0, 30.0));
    p.quad_to((18.0, 25.0), (17.0, 30.0));
    p
}

/// Trousers, shorts or skirt. Drawn last so the hem overlaps the shoe and sock.
pub fn pant(color: Color, length: PantLength) -> Vec<DrawOp> {
    let path = match length {
        PantLength::Short => polygon(&[(-40.0, -160.0), (40.0, -160.0), (45.0, -80.0), (-45.0, -80.0)]),
        PantLength::Skirt => {
            let mut p = BezPath::new();
            p.move_to((-35.0, -160.0));
            p.line_to((35.0, -160.0));
            p.quad_to((60.0, -80.0), (70.0, -60.0));
            p.line_to((-70.0, -60.0));
            p.quad_to((-60.0, -80.0), (-35.0, -160.0));
            p.close_path();
            p
        }
        PantLength::Cropped => {
            polygon(&[(-35.0, -160.0), (35.0, -160.0), (30.0, -20.0), (-30.0, -20.0)])
        }
        PantLength::Rolled => {
            polygon(&[(-40.0, -160.0), (40.0, -160.0), (38.0, -30.0), (-38.0, -30.0)])
        }
    };
    vec![DrawOp::solid(Layer::Pant, path, color).with_filter(FilterRef::SoftShadow)]
}

/// Footwear, dispatched on kind.
pub fn shoe(bundle: &AssetBundle) -> Vec<DrawOp> {
    match bundle.footwear_kind {
        FootwearKind::Heels => heels(bundle),
        FootwearKind::Runners | FootwearKind::Sneakers => runners(bundle),
        FootwearKind::Slippers => slippers(bundle),
    }
}

fn heels(b: &AssetBundle) -> Vec<DrawOp> {
    let spike = polygon(&[(-25.0, 70.0), (-20.0, 70.0), (-15.0, 95.0), (-22.0, 95.0)]);

    let mut arch = BezPath::new();
    arch.move_to((-20.0, 70.0));
    arch.quad_to((10.0, 50.0), (50.0, 85.0));
    arch.line_to((40.0, 85.0));
    arch.quad_to((10.0, 60.0), (-20.0, 70.0));
    arch.close_path();

    let mut body = BezPath::new();
    body.move_to((-25.0, 70.0));
    body.quad_to((-25.0, 50.0), (5.0, 50.0));
    body.line_to((50.0, 85.0));
    body.line_to((55.0, 88.0));
    body.line_to((-25.0, 85.0));
    body.close_path();

    let mut opening = BezPath::new();
    opening.move_to((-15.0, 55.0));
    opening.quad_to((10.0, 50.0), (30.0, 70.0));

    let mut shine = BezPath::new();
    shine.move_to((-10.0, 60.0));
    shine.quad_to((10.0, 55.0), (35.0, 80.0));

    let mut ops = vec![
        DrawOp::solid(Layer::Shoe, spike, b.shoe_primary),
        DrawOp::solid(Layer::Shoe, arch, Color::BLACK).with_opacity(0.3),
        DrawOp::solid(Layer::Shoe, body.clone(), b.shoe_primary),
    ];
    if b.texture_tag == TextureTag::Shine {
        ops.push(DrawOp::fill(
            Layer::Shoe,
            body,
            Paint::Gradient(GradientRef::LeatherShine),
        ));
    }
    ops.push(
        DrawOp::stroke(
            Layer::Shoe,
            opening,
            Stroke {
                color: Color::BLACK,
                width: 0.5,
                round_cap: false,
            },
        )
        .with_opacity(0.2),
    );
    ops.push(
        DrawOp::stroke(
            Layer::Shoe,
            shine,
            Stroke {
                color: Color::WHITE,
                width: 4.0,
                round_cap: true,
            },
        )
        .with_opacity(0.4),
    );
    offset_all(ops, 10.0)
}

fn runners(b: &AssetBundle) -> Vec<DrawOp> {
    let mut sole = BezPath::new();
    sole.move_to((-30.0, 70.0));
    sole.curve_to((-30.0, 90.0), (80.0, 90.0), (90.0, 75.0));
    sole.line_to((90.0, 60.0));
    sole.line_to((-30.0, 60.0));
    sole.close_path();

    let mut upper = BezPath::new();
    upper.move_to((-28.0, 62.0));
    upper.curve_to((-28.0, 20.0), (20.0, 20.0), (40.0, 50.0));
    upper.line_to((85.0, 62.0));
    upper.line_to((-28.0, 62.0));
    upper.close_path();

    let mut toe_cap = BezPath::new();
    toe_cap.move_to((85.0, 62.0));
    toe_cap.line_to((90.0, 62.0));
    toe_cap.curve_to((95.0, 62.0), (95.0, 75.0), (85.0, 75.0));
    toe_cap.line_to((60.0, 75.0));
    toe_cap.curve_to((70.0, 65.0), (80.0, 62.0), (85.0, 62.0));
    toe_cap.close_path();

    let ops = vec![
        DrawOp::solid(Layer::Shoe, sole, b.sole_color),
        DrawOp::stroke(
            Layer::Shoe,
            polyline(&[(-30.0, 72.0), (90.0, 72.0)]),
            Stroke {
                color: Color::hex(0xcbd5e1),
                width: 2.0,
                round_cap: false,
            },
        ),
        DrawOp::solid(Layer::Shoe, upper, b.shoe_primary),
        DrawOp::solid(Layer::Shoe, toe_cap, b.sole_color).with_opacity(0.9),
        // Chevron stripe.
        DrawOp::stroke(
            Layer::Shoe,
            polyline(&[(0.0, 60.0), (30.0, 40.0), (50.0, 60.0)]),
            Stroke {
                color: b.shoe_secondary,
                width: 6.0,
                round_cap: true,
            },
        ),
        // Lacing.
        DrawOp::stroke(
            Layer::Shoe,
            polyline(&[(-10.0, 45.0), (20.0, 45.0), (-5.0, 50.0), (25.0, 50.0)]),
            Stroke {
                color: Color::WHITE,
                width: 2.0,
                round_cap: false,
            },
        ),
    ];
    offset_all(ops, 10.0)
}

fn slippers(b: &AssetBundle) -> Vec<DrawOp> {
    let mut sole = BezPath::new();
    sole.move_to((-30.0, 75.0));
    sole.quad_to((30.0, 85.0), (90.0, 75.0));
    sole.line_to((90.0, 65.0));
    sole.quad_to((30.0, 55.0), (-30.0, 65.0));
    sole.close_path();

    let mut body = BezPath::new();
    body.move_to((-30.0, 65.0));
    body.curve_to((-30.0, 30.0), (40.0, 30.0), (90.0, 65.0));
    body.line_to((90.0, 75.0));
    body.line_to((-30.0, 75.0));
    body.close_path();

    let ops = vec![
        DrawOp::solid(Layer::Shoe, sole, b.sole_color),
        DrawOp::solid(Layer::Shoe, body, b.shoe_primary),
        DrawOp::ellipse(
            Layer::Shoe,
            Point::new(20.0, 55.0),
            Vec2::new(30.0, 15.0),
            Color::BLACK,
        )
        .with_opacity(0.2),
    ];
    offset_all(ops, 15.0)
}

fn offset_all(ops: Vec<DrawOp>, dy: f64) -> Vec<DrawOp> {
    ops.into_iter().map(|op| op.translated(0.0, dy)).collect()
}

/// One leg, painted bottom to top: leg, sock, shoe, pant.
pub fn leg_stack(bundle: &AssetBundle) -> Vec<DrawOp> {
    let mut ops = leg(bundle.skin_tone);
    ops.extend(sock(bundle.sock_color, bundle.sock_height));
    ops.extend(shoe(bundle));
    ops.extend(pant(bundle.pant_color, bundle.pant_length));
    ops
}

/// Both legs, slightly splayed in opposite directions.
pub fn compose_feet(bundle: &AssetBundle) -> FeetComposition {
    let ops = leg_stack(bundle);
    FeetComposition {
        legs: [
            LegGroup {
                transform: placement(LEFT_LEG),
                ops: ops.clone(),
            },
            LegGroup {
                transform: placement(RIGHT_LEG),
                ops,
            },
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/limb.rs"]
mod tests;
