use image::{Rgba, RgbaImage};

use super::*;

fn single(px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(1, 1, Rgba(px))
}

#[test]
fn grayscale_uses_perceptual_weights() {
    let out = Filter::Grayscale.apply(&single([100, 150, 200, 77]));
    // 100*0.299 + 150*0.587 + 200*0.114 = 140.75
    assert_eq!(out.get_pixel(0, 0), &Rgba([141, 141, 141, 77]));
}

#[test]
fn sepia_saturates_at_white() {
    let out = Filter::Sepia.apply(&single([255, 255, 255, 255]));
    assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 239, 255]));
}

#[test]
fn invert_flips_channels_but_not_alpha() {
    let out = Filter::Invert.apply(&single([0, 100, 255, 40]));
    assert_eq!(out.get_pixel(0, 0), &Rgba([255, 155, 0, 40]));
}

#[test]
fn apply_leaves_source_untouched() {
    let source = single([1, 2, 3, 4]);
    let out = Filter::Invert.apply(&source);
    assert_eq!(source.get_pixel(0, 0), &Rgba([1, 2, 3, 4]));
    assert_ne!(out, source);
}

#[test]
fn filter_names_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Filter::Grayscale).unwrap_or_default(), "\"grayscale\"");
}
