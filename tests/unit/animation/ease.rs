use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::OutQuad, Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn out_curves_lead_linear() {
    assert!(Ease::OutCubic.apply(0.3) > Ease::Linear.apply(0.3));
    assert!(Ease::OutQuad.apply(0.3) > Ease::Linear.apply(0.3));
}

#[test]
fn lerp_hits_both_ends_and_clamps() {
    assert_eq!(Ease::OutCubic.lerp(3.5, 1.3, 0.0), 3.5);
    assert_eq!(Ease::OutCubic.lerp(3.5, 1.3, 1.0), 1.3);
    assert_eq!(Ease::Linear.lerp(1.0, 2.0, 7.0), 2.0);
}
