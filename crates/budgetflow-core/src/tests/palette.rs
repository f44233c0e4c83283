use crate::palette::*;

#[test]
fn mix_interpolates_hex_colors() {
    let a = ColorToken::new("#000000");
    let b = ColorToken::new("#ffffff");
    assert_eq!(a.mix(&b, 0.0).as_str(), "#000000");
    assert_eq!(a.mix(&b, 1.0).as_str(), "#ffffff");
    assert_eq!(a.mix(&b, 0.5).as_str(), "#808080");
    assert_eq!(ColorToken::new("#f00").mix(&b, 2.0).as_str(), "#ffffff");
}

#[test]
fn mix_falls_back_to_nearest_endpoint_for_non_hex_tokens() {
    let a = ColorToken::new("tomato");
    let b = ColorToken::new("#ffffff");
    assert_eq!(a.mix(&b, 0.2), a);
    assert_eq!(a.mix(&b, 0.8), b);
}

#[test]
fn category_colors_cycle() {
    assert_eq!(category_color(0), category_color(CATEGORY_PALETTE.len()));
    assert_ne!(category_color(0), category_color(1));
}
