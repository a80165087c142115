use super::*;
use serde_json::json;

#[test]
fn parses_short_long_and_alpha_forms() {
    assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
    assert_eq!("#ffdbac".parse::<Color>().unwrap(), Color::hex(0xffdbac));
    assert_eq!(
        "FFFFFFE6".parse::<Color>().unwrap(),
        Color::WHITE.with_alpha(0xe6)
    );
}

#[test]
fn rejects_malformed_hex() {
    assert!("#12345".parse::<Color>().is_err());
    assert!("#gg0000".parse::<Color>().is_err());
    assert!("".parse::<Color>().is_err());
}

#[test]
fn svg_hex_drops_alpha_and_opacity_carries_it() {
    let c = Color::WHITE.with_alpha(230);
    assert_eq!(c.svg_hex(), "#ffffff");
    assert!((c.opacity() - 230.0 / 255.0).abs() < 1e-9);
    assert_eq!(c.to_string(), "#ffffffe6");
}

#[test]
fn serde_uses_hex_strings() {
    let v = serde_json::to_value(Color::hex(0x3b82f6)).unwrap();
    assert_eq!(v, json!("#3b82f6"));
    let back: Color = serde_json::from_value(v).unwrap();
    assert_eq!(back, Color::hex(0x3b82f6));
}
