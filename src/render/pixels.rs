//! Conversions between `image` buffers and tiny-skia pixmaps.

use image::{GrayImage, Rgba, RgbaImage};
use resvg::tiny_skia::{self, Pixmap};

use super::alpha::mul_div255;
use crate::style::Color;

/// Converts a premultiplied pixmap to a straight-alpha image.
pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *dst = Rgba([r, g, b, a]);
    }
    img
}

/// Converts a straight-alpha image to a premultiplied pixmap.
///
/// Returns `None` for a zero-sized image.
pub(crate) fn rgba_image_to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.data_mut().chunks_exact_mut(4).zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        dst.copy_from_slice(&[mul_div255(r, a), mul_div255(g, a), mul_div255(b, a), a]);
    }
    Some(pixmap)
}

/// Paints `color` through a coverage map.
pub(crate) fn tint(alpha: &GrayImage, color: Color) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(alpha.width(), alpha.height())?;
    for (dst, coverage) in pixmap.data_mut().chunks_exact_mut(4).zip(alpha.as_raw()) {
        let a = mul_div255(color.alpha, *coverage);
        dst.copy_from_slice(&[
            mul_div255(color.red, a),
            mul_div255(color.green, a),
            mul_div255(color.blue, a),
            a,
        ]);
    }
    Some(pixmap)
}

/// Builds a clip mask from a coverage map.
pub(crate) fn clip_mask(alpha: &GrayImage) -> Option<tiny_skia::Mask> {
    let mut mask = tiny_skia::Mask::new(alpha.width(), alpha.height())?;
    mask.data_mut().copy_from_slice(alpha.as_raw());
    Some(mask)
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}
