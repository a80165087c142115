use super::*;

#[test]
fn pure_red_becomes_dim_yellow() {
    assert_eq!(ColorMatrix::DICHROMAT.apply([255, 0, 0, 255]), [102, 102, 0, 255]);
}

#[test]
fn pure_green_becomes_bright_yellow() {
    assert_eq!(ColorMatrix::DICHROMAT.apply([0, 255, 0, 255]), [153, 153, 0, 255]);
}

#[test]
fn pure_blue_is_unchanged() {
    assert_eq!(ColorMatrix::DICHROMAT.apply([0, 0, 255, 255]), [0, 0, 255, 255]);
}

#[test]
fn green_stays_brighter_than_red() {
    let r = ColorMatrix::DICHROMAT.apply([200, 0, 0, 255]);
    let g = ColorMatrix::DICHROMAT.apply([0, 200, 0, 255]);
    assert!(g[0] > r[0]);
}

#[test]
fn identity_is_identity() {
    let px = [12, 34, 56, 78];
    assert_eq!(ColorMatrix::IDENTITY.apply(px), px);
}

#[test]
fn yellow_lift_skips_blue_and_saturates() {
    assert_eq!(
        ChannelGain::YELLOW_LIFT.apply([100, 100, 100, 255]),
        [105, 105, 100, 255]
    );
    assert_eq!(
        ChannelGain::YELLOW_LIFT.apply([250, 250, 250, 9]),
        [255, 255, 250, 9]
    );
    assert_eq!(ChannelGain::NONE.apply([1, 2, 3, 4]), [1, 2, 3, 4]);
}

#[test]
fn svg_values_has_twenty_entries() {
    let values = ColorMatrix::DICHROMAT.svg_values();
    assert_eq!(values.split(' ').count(), 20);
    assert!(values.starts_with("0.4 0.6 0 0 0 0.4 0.6"));
}
