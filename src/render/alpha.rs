//! Coverage-map arithmetic used to build shadows and glows.
//!
//! Every function works on 8-bit coverage where 255 is fully inside the
//! icon. Pixels outside an image count as 0 unless stated otherwise.

use image::{GrayImage, Luma};

/// `a * b / 255`, rounded.
pub(crate) fn mul_div255(a: u8, b: u8) -> u8 {
    let p = a as u32 * b as u32 + 128;
    ((p + (p >> 8)) >> 8) as u8
}

pub(crate) fn invert(alpha: &GrayImage) -> GrayImage {
    let mut out = alpha.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = 255 - pixel[0];
    }
    out
}

/// Pixelwise product of two maps of equal size.
pub(crate) fn multiply(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([mul_div255(a.get_pixel(x, y)[0], b.get_pixel(x, y)[0])])
    })
}

/// `a - b`, saturating at 0.
pub(crate) fn subtract(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y)[0].saturating_sub(b.get_pixel(x, y)[0])])
    })
}

/// Shifts the map by `(dx, dy)` pixels, filling uncovered pixels with `fill`.
///
/// Fractional offsets are resampled bilinearly, so whole-pixel shifts copy
/// the map exactly.
pub(crate) fn offset(alpha: &GrayImage, dx: f32, dy: f32, fill: u8) -> GrayImage {
    let (width, height) = alpha.dimensions();
    let sample = |x: i64, y: i64| -> f32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            fill as f32
        } else {
            alpha.get_pixel(x as u32, y as u32)[0] as f32
        }
    };
    GrayImage::from_fn(width, height, |x, y| {
        let sx = x as f32 - dx;
        let sy = y as f32 - dy;
        let (x0, y0) = (sx.floor(), sy.floor());
        let (fx, fy) = (sx - x0, sy - y0);
        let (x0, y0) = (x0 as i64, y0 as i64);
        let top = sample(x0, y0) * (1.0 - fx) + sample(x0 + 1, y0) * fx;
        let bottom = sample(x0, y0 + 1) * (1.0 - fx) + sample(x0 + 1, y0 + 1) * fx;
        Luma([(top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8])
    })
}

/// Grows covered regions by `radius` pixels (square structuring element).
pub(crate) fn dilate(alpha: &GrayImage, radius: u32) -> GrayImage {
    morph(alpha, radius, u8::max)
}

/// Shrinks covered regions by `radius` pixels. The image border erodes too.
pub(crate) fn erode(alpha: &GrayImage, radius: u32) -> GrayImage {
    morph(alpha, radius, u8::min)
}

/// Largest radius or sigma that still changes a map of this size.
pub(crate) fn reach(alpha: &GrayImage) -> u32 {
    alpha.width().max(alpha.height())
}

fn morph(alpha: &GrayImage, radius: u32, pick: fn(u8, u8) -> u8) -> GrayImage {
    let radius = radius.min(reach(alpha));
    if radius == 0 {
        return alpha.clone();
    }
    let horizontal = morph_pass(alpha, radius as usize, pick, true);
    morph_pass(&horizontal, radius as usize, pick, false)
}

fn morph_pass(alpha: &GrayImage, radius: usize, pick: fn(u8, u8) -> u8, horizontal: bool) -> GrayImage {
    let (width, height) = alpha.dimensions();
    let mut out = GrayImage::new(width, height);
    let (lines, len) = if horizontal { (height, width) } else { (width, height) };
    let mut line = Vec::with_capacity(len as usize);
    for l in 0..lines {
        line.clear();
        line.extend((0..len).map(|i| {
            if horizontal {
                alpha.get_pixel(i, l)[0]
            } else {
                alpha.get_pixel(l, i)[0]
            }
        }));
        for (i, value) in window_line(&line, radius, pick).into_iter().enumerate() {
            let (x, y) = if horizontal { (i as u32, l) } else { (l, i as u32) };
            out.put_pixel(x, y, Luma([value]));
        }
    }
    out
}

/// Running `pick` over a `2 * radius + 1` window centred on each sample,
/// with zeros beyond both ends. Linear in the line length (van Herk/Gil-Werman).
fn window_line(line: &[u8], radius: usize, pick: fn(u8, u8) -> u8) -> Vec<u8> {
    let window = 2 * radius + 1;
    let mut padded = vec![0u8; line.len() + 2 * radius];
    padded[radius..radius + line.len()].copy_from_slice(line);

    let n = padded.len();
    let mut prefix = padded.clone();
    let mut suffix = padded.clone();
    for i in 1..n {
        if i % window != 0 {
            prefix[i] = pick(prefix[i - 1], padded[i]);
        }
    }
    for i in (0..n - 1).rev() {
        if (i + 1) % window != 0 {
            suffix[i] = pick(suffix[i + 1], padded[i]);
        }
    }
    (0..line.len())
        .map(|i| pick(suffix[i], prefix[i + window - 1]))
        .collect()
}

/// Gaussian blur with standard deviation `sigma` pixels, capped at the map's
/// larger side.
pub(crate) fn blur(alpha: &GrayImage, sigma: f32) -> GrayImage {
    if sigma.is_nan() || sigma <= 0.0 {
        return alpha.clone();
    }
    image::imageops::blur(alpha, sigma.min(reach(alpha) as f32))
}
