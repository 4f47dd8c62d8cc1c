//! Pixel filters for image objects.
//!
//! Filters always read the object's original bitmap and produce a new one,
//! so applying a second filter replaces the first instead of stacking.

#[cfg(test)]
#[path = "filters_test.rs"]
mod filters_test;

use image::{Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Grayscale,
    Sepia,
    Invert,
}

impl Filter {
    /// Produce a filtered copy of `source`. Alpha is left untouched.
    #[must_use]
    pub fn apply(self, source: &RgbaImage) -> RgbaImage {
        let mut out = source.clone();
        match self {
            Self::Grayscale => map_rgb(&mut out, |r, g, b| {
                let luma = weighted(r, g, b, [0.299, 0.587, 0.114]);
                [luma, luma, luma]
            }),
            Self::Sepia => map_rgb(&mut out, |r, g, b| {
                [
                    weighted(r, g, b, [0.393, 0.769, 0.189]),
                    weighted(r, g, b, [0.349, 0.686, 0.168]),
                    weighted(r, g, b, [0.272, 0.534, 0.131]),
                ]
            }),
            Self::Invert => imageops::invert(&mut out),
        }
        out
    }
}

fn map_rgb(image: &mut RgbaImage, f: impl Fn(u8, u8, u8) -> [u8; 3]) {
    for Rgba([r, g, b, _]) in image.pixels_mut() {
        [*r, *g, *b] = f(*r, *g, *b);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn weighted(r: u8, g: u8, b: u8, w: [f64; 3]) -> u8 {
    let v = w[2].mul_add(f64::from(b), w[0].mul_add(f64::from(r), w[1] * f64::from(g)));
    v.round().clamp(0.0, 255.0) as u8
}
