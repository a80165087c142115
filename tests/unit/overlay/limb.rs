use super::*;
use crate::{
    overlay::draw::Shape,
    scene::{SceneSelector, resolve},
};

fn layers(ops: &[DrawOp]) -> Vec<Layer> {
    ops.iter().map(|op| op.layer).collect()
}

#[test]
fn stack_paints_leg_sock_shoe_pant_in_order() {
    for scene in SceneSelector::ALL {
        let ops = leg_stack(&resolve(scene));
        let l = layers(&ops);
        let mut sorted = l.clone();
        sorted.sort();
        assert_eq!(l, sorted, "{scene} stack out of order");
        assert_eq!(l.first(), Some(&Layer::Leg));
        assert_eq!(l.last(), Some(&Layer::Pant));
    }
}

#[test]
fn pant_carries_soft_shadow() {
    for length in [
        PantLength::Short,
        PantLength::Skirt,
        PantLength::Cropped,
        PantLength::Rolled,
    ] {
        let ops = pant(Color::hex(0x60a5fa), length);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].filter, Some(FilterRef::SoftShadow));
    }
}

#[test]
fn frilly_sock_adds_ruffle_and_none_draws_nothing() {
    let mid = sock(Color::WHITE, SockHeight::Mid);
    let frilly = sock(Color::WHITE, SockHeight::Frilly);
    assert_eq!(frilly.len(), mid.len() + 1);
    assert!(frilly.iter().any(|op| op.stroke.is_some()));
    assert!(sock(Color::WHITE, SockHeight::None).is_empty());
}

#[test]
fn footwear_variants_have_their_details() {
    let heels = shoe(&resolve(SceneSelector::Fancy));
    // Spike, arch, body, shine gradient, opening arc, shine stroke.
    assert_eq!(heels.len(), 6);
    assert!(
        heels
            .iter()
            .any(|op| op.fill == Some(Paint::Gradient(GradientRef::LeatherShine)))
    );

    let runners = shoe(&resolve(SceneSelector::Sport));
    let chevron = runners
        .iter()
        .find(|op| op.stroke.is_some_and(|s| s.width == 6.0))
        .expect("chevron stripe");
    assert_eq!(
        chevron.stroke.map(|s| s.color),
        Some(Color::hex(0x166534))
    );

    let slippers = shoe(&resolve(SceneSelector::Indoor));
    assert!(
        slippers
            .iter()
            .any(|op| matches!(op.shape, Shape::Ellipse { .. }))
    );
}

#[test]
fn sneakers_and_runners_share_geometry() {
    let mut casual = resolve(SceneSelector::Casual);
    let sneakers = shoe(&casual);
    casual.footwear_kind = FootwearKind::Runners;
    assert_eq!(shoe(&casual), sneakers);
}

#[test]
fn legs_are_offset_and_rotated_opposite_ways() {
    let feet = compose_feet(&resolve(SceneSelector::Casual));
    let [l, r] = &feet.legs;
    assert_eq!(l.ops, r.ops);

    let lc = l.transform.as_coeffs();
    let rc = r.transform.as_coeffs();
    // sin(theta) sits in coefficient b.
    assert!(lc[1] < 0.0);
    assert!(rc[1] > 0.0);
    assert_ne!((lc[4], lc[5]), (rc[4], rc[5]));
}
